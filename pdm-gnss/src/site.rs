use serde::{Deserialize, Serialize};

/// Two-digit suffixes of the monitored sites, in display order.
///
/// Suffix 08 has no receiver and is absent on purpose.
pub const SITE_SUFFIXES: [&str; 14] = [
    "00", "01", "02", "03", "04", "05", "06", "07", "09", "10", "11", "12", "13", "14",
];

/// Per-site 12-hourly download. `{suffix}` is replaced by the site suffix.
pub const DEFAULT_SITE_URL_TEMPLATE: &str =
    "http://gnssmonitoring.com.au/unitzero/peakdowns/processed_data/PD_UNITZERO_{suffix}/Download_12HRLY.csv";

/// A fixed GNSS monitoring location.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct Site {
    pub suffix: String,
}

impl Site {
    pub fn new(suffix: &str) -> Self {
        Site {
            suffix: suffix.to_string(),
        }
    }

    /// Display name, e.g. "SITE_07".
    pub fn name(&self) -> String {
        format!("SITE_{}", self.suffix)
    }

    /// Resolve the download URL for this site from a template.
    pub fn url(&self, template: &str) -> String {
        template.replace("{suffix}", &self.suffix)
    }

    /// The hardcoded site list.
    pub fn fixed_list() -> Vec<Site> {
        SITE_SUFFIXES.iter().map(|s| Site::new(s)).collect()
    }
}
