//! The refresh pipeline behind `POST /update`.
//!
//! Sites first (bounded, ordered), then the blast log and the two geometry
//! archives, then reprojection. Anything short of "no site at all" or a
//! broken projection degrades to a notice instead of failing the refresh.

use crate::{config::DashboardConfig, state::AppState};
use log::{debug, info, warn};
use pdm_chart_ui::{
    figures::{map_figure, placeholder_figure, timeseries_figure},
    page::render_auth_fragment,
};
use pdm_geo::{
    archive::lines_from_zip,
    error::GeoError,
    features::{GeometryFeature, CONTOURS, FAULTS},
    reproject::Reprojector,
};
use pdm_gnss::{
    blast::{parse_blast_log, BlastRecord},
    reading::SiteReading,
    telemetry::SiteTelemetry,
    upstream::{fetch_sites, Upstream},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const LOGIN_PROMPT: &str = "Please log in";
pub const UNAVAILABLE_TITLE: &str = "Upstream data unavailable";

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Upstream data unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Projection failed: {0}")]
    Projection(#[from] GeoError),
}

/// Everything one refresh gathered, in fixed site order.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub readings: Vec<SiteReading>,
    pub telemetry: Vec<SiteTelemetry>,
    pub blasts: Vec<BlastRecord>,
    pub features: Vec<GeometryFeature>,
    pub notices: Vec<String>,
}

async fn load_feature<U: Upstream>(
    upstream: &U,
    url: &str,
    (label, color): (&str, &str),
) -> anyhow::Result<GeometryFeature> {
    let bytes = upstream.get_bytes(url).await?;
    let lines = lines_from_zip(&bytes)?;
    Ok(GeometryFeature::from_lines(label, color, &lines))
}

/// Run the full pipeline against `upstream`.
pub async fn collect<U: Upstream>(
    upstream: &U,
    config: &DashboardConfig,
) -> Result<DashboardData, RefreshError> {
    info!("Refreshing {} sites", config.sites.len());
    let mut notices = Vec::new();

    let fetched = fetch_sites(
        upstream,
        &config.sites,
        &config.site_url_template,
        config.fetch_concurrency,
    )
    .await;
    let mut telemetry = Vec::with_capacity(fetched.len());
    for (site, result) in fetched {
        match result {
            Ok(t) if t.latest().is_some() => telemetry.push(t),
            Ok(_) => {
                warn!("{}: no usable rows, skipping", site.name());
                notices.push(format!("{}: no readings", site.name()));
            }
            Err(e) => {
                warn!("{}: skipped: {}", site.name(), e);
                notices.push(format!("{}: {}", site.name(), e));
            }
        }
    }
    if telemetry.is_empty() {
        return Err(RefreshError::UpstreamUnavailable(String::from(
            "no site returned readings",
        )));
    }

    let endwalls = config.endwall_names();
    let blasts = match upstream.get_text(&config.blast_url).await {
        Ok(body) => parse_blast_log(&body, &endwalls).unwrap_or_else(|e| {
            warn!("Blast log unreadable: {}", e);
            notices.push(format!("Blast vibrations: {e}"));
            Vec::new()
        }),
        Err(e) => {
            warn!("Blast log unavailable: {}", e);
            notices.push(format!("Blast vibrations: {e}"));
            Vec::new()
        }
    };

    let mut features = Vec::new();
    for (url, style) in [(&config.contours_url, CONTOURS), (&config.faults_url, FAULTS)] {
        match load_feature(upstream, url, style).await {
            Ok(feature) if feature.is_empty() => {
                warn!("{} archive holds no lines", style.0);
                notices.push(format!("{}: no lines in archive", style.0));
            }
            Ok(feature) => {
                debug!("{}: {} lines", style.0, feature.line_count());
                features.push(feature);
            }
            Err(e) => {
                warn!("{} unavailable: {}", style.0, e);
                notices.push(format!("{}: {e}", style.0));
            }
        }
    }

    // Built after the last await so the projection never crosses one.
    let reprojector = Reprojector::from_file(&config.projection_path)?;
    let mut readings = Vec::with_capacity(telemetry.len());
    for t in &telemetry {
        let Some(latest) = t.latest() else { continue };
        match reprojector.to_lon_lat(latest.easting, latest.northing) {
            Ok((lon, lat)) => readings.push(SiteReading::new(t.site.name(), lon, lat, latest.velocity)),
            Err(e) => {
                warn!("{}: {}", t.site.name(), e);
                notices.push(format!("{}: {e}", t.site.name()));
            }
        }
    }
    if readings.is_empty() {
        return Err(RefreshError::UpstreamUnavailable(String::from(
            "no site could be placed on the map",
        )));
    }

    info!(
        "Refresh finished: {} of {} sites, {} blasts, {} overlays",
        readings.len(),
        config.sites.len(),
        blasts.len(),
        features.len()
    );
    Ok(DashboardData {
        readings,
        telemetry,
        blasts,
        features,
        notices,
    })
}

/// Body of the `/update` response.
#[derive(Debug, Serialize)]
pub struct UpdatePayload {
    pub authenticated: bool,
    pub map: Value,
    pub graph: Value,
    pub auth_html: String,
    pub notices: Vec<String>,
}

impl UpdatePayload {
    pub fn anonymous() -> Self {
        UpdatePayload {
            authenticated: false,
            map: placeholder_figure(LOGIN_PROMPT),
            graph: placeholder_figure(LOGIN_PROMPT),
            auth_html: render_auth_fragment(false),
            notices: Vec::new(),
        }
    }

    pub fn unavailable(err: &RefreshError) -> Self {
        UpdatePayload {
            authenticated: true,
            map: placeholder_figure(UNAVAILABLE_TITLE),
            graph: placeholder_figure(UNAVAILABLE_TITLE),
            auth_html: render_auth_fragment(true),
            notices: vec![err.to_string()],
        }
    }

    pub fn from_data(data: DashboardData, endwalls: &[(String, String)]) -> Self {
        UpdatePayload {
            authenticated: true,
            map: map_figure(&data.readings, &data.features),
            graph: timeseries_figure(&data.telemetry, &data.blasts, endwalls),
            auth_html: render_auth_fragment(true),
            notices: data.notices,
        }
    }
}

/// Anonymous callers get placeholders and nothing is fetched.
pub async fn refresh<U: Upstream>(state: &AppState<U>, user: Option<&str>) -> UpdatePayload {
    let Some(user) = user else {
        return UpdatePayload::anonymous();
    };
    info!("Refresh requested by {}", user);
    match collect(&state.upstream, &state.config).await {
        Ok(data) => UpdatePayload::from_data(data, &state.config.endwalls),
        Err(e) => {
            warn!("Refresh failed: {}", e);
            UpdatePayload::unavailable(&e)
        }
    }
}
