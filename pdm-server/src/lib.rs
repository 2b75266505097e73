//! Web server for the PDM corridor monitoring dashboard.

pub mod config;
pub mod credentials;
pub mod refresh;
pub mod routes;
pub mod session;
pub mod state;

use anyhow::Context;
use config::{DashboardConfig, ServeArgs};
use credentials::Credentials;
use log::info;
use pdm_geo::reproject::Reprojector;
use pdm_gnss::upstream::HttpUpstream;
use session::SignedSessions;
use state::AppState;
use std::{sync::Arc, time::Duration};

/// Load configuration, bind, and serve until the process is stopped.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let credentials = Credentials::from_file(&args.users_csv)?;
    info!("Loaded {} users from {}", credentials.len(), args.users_csv.display());

    let ttl = session::session_ttl(args.session_ttl_hours)?;
    let sessions = match &args.session_secret {
        Some(secret) => SignedSessions::new(secret.as_bytes(), ttl)?,
        None => {
            info!("No session secret configured; sessions end when the process stops");
            SignedSessions::random(ttl)?
        }
    };

    let config = DashboardConfig::new(args.projection.clone(), args.fetch_concurrency);
    let definition = Reprojector::from_file(&config.projection_path)
        .with_context(|| format!("bad projection in {}", config.projection_path.display()))?
        .definition()
        .to_string();
    info!("Projection: {}", definition);

    let upstream = HttpUpstream::new(Duration::from_secs(args.fetch_timeout_secs))?;
    let state = Arc::new(AppState::new(upstream, config, credentials, Box::new(sessions)));
    let app = routes::router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
