//! Process configuration: command line / environment arguments and the
//! compiled-in upstream locations.

use clap::Args;
use pdm_gnss::{
    blast::{DEFAULT_BLAST_URL, DEFAULT_ENDWALLS},
    site::{Site, DEFAULT_SITE_URL_TEMPLATE},
};
use std::path::PathBuf;

/// Zipped contour lines.
pub const DEFAULT_CONTOURS_URL: &str =
    "https://github.com/j-ahn/monitoring/blob/eabb940a140e7a94aec373e0ddfc9a652bc37988/CONTOURS.zip?raw=true";

/// Zipped fault lines.
pub const DEFAULT_FAULTS_URL: &str = "https://github.com/j-ahn/monitoring/blob/main/FAULTS.zip?raw=true";

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8050)]
    pub port: u16,

    /// CSV of `username,password` pairs allowed to log in
    #[arg(long, env = "PDM_USERS_CSV", default_value = "fixtures/users.csv")]
    pub users_csv: PathBuf,

    /// PROJ definition of the local mine grid
    #[arg(long, env = "PDM_PROJECTION", default_value = "fixtures/PDMG.proj4")]
    pub projection: PathBuf,

    /// Key for signing session tokens (random per process when absent)
    #[arg(long, env = "PDM_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,

    /// Session lifetime
    #[arg(long, default_value_t = 12)]
    pub session_ttl_hours: i64,

    /// Timeout for every outbound request
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout_secs: u64,

    /// Maximum site downloads in flight at once
    #[arg(long, default_value_t = 4)]
    pub fetch_concurrency: usize,
}

/// Where a refresh reads its data from.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub sites: Vec<Site>,
    pub site_url_template: String,
    pub blast_url: String,
    /// Endwall column names paired with marker colours
    pub endwalls: Vec<(String, String)>,
    pub contours_url: String,
    pub faults_url: String,
    pub projection_path: PathBuf,
    pub fetch_concurrency: usize,
}

impl DashboardConfig {
    /// The fixed site list and upstream locations.
    pub fn new(projection_path: PathBuf, fetch_concurrency: usize) -> Self {
        DashboardConfig {
            sites: Site::fixed_list(),
            site_url_template: DEFAULT_SITE_URL_TEMPLATE.to_string(),
            blast_url: DEFAULT_BLAST_URL.to_string(),
            endwalls: DEFAULT_ENDWALLS
                .iter()
                .map(|(name, color)| (name.to_string(), color.to_string()))
                .collect(),
            contours_url: DEFAULT_CONTOURS_URL.to_string(),
            faults_url: DEFAULT_FAULTS_URL.to_string(),
            projection_path,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    pub fn endwall_names(&self) -> Vec<&str> {
        self.endwalls.iter().map(|(name, _)| name.as_str()).collect()
    }
}
