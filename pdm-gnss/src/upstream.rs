//! HTTP access to the remote CSV and archive hosts.
//!
//! Everything outbound goes through [`Upstream`], so callers can swap the
//! real client for a recording double in tests.

use crate::{
    error::{GnssError, Result},
    site::Site,
    telemetry::SiteTelemetry,
};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::{future::Future, time::Duration};

/// Source of remote resources.
pub trait Upstream: Send + Sync {
    /// GET a resource as text.
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    /// GET a resource as raw bytes.
    fn get_bytes(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Real upstream backed by a reqwest client with a request timeout.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GnssError::UpstreamUnavailable {
                url: String::from("<client>"),
                reason: e.to_string(),
            })?;
        Ok(HttpUpstream { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let unavailable = |reason: String| GnssError::UpstreamUnavailable {
            url: url.to_string(),
            reason,
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if response.status() != StatusCode::OK {
            warn!("Bad response status for {}: {}", url, response.status());
            return Err(unavailable(format!("status {}", response.status())));
        }
        Ok(response)
    }
}

/// A body holding nothing but whitespace counts as no data.
fn non_empty(url: &str, body: String) -> Result<String> {
    if body.trim().is_empty() {
        return Err(GnssError::UpstreamUnavailable {
            url: url.to_string(),
            reason: String::from("empty response"),
        });
    }
    Ok(body)
}

impl Upstream for HttpUpstream {
    async fn get_text(&self, url: &str) -> Result<String> {
        let body = self
            .get(url)
            .await?
            .text()
            .await
            .map_err(|e| GnssError::UpstreamUnavailable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        non_empty(url, body)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| GnssError::UpstreamUnavailable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}

/// Fetch and parse every site, at most `concurrency` requests in flight.
///
/// Results come back in the order of `sites`, whatever order the requests
/// finish in. A failed site carries its error rather than aborting the rest.
pub async fn fetch_sites<U: Upstream>(
    upstream: &U,
    sites: &[Site],
    url_template: &str,
    concurrency: usize,
) -> Vec<(Site, Result<SiteTelemetry>)> {
    stream::iter(sites.iter().cloned())
        .map(|site| async move {
            let url = site.url(url_template);
            debug!("Fetching {} from {}", site.name(), url);
            let result = match upstream.get_text(&url).await {
                Ok(body) => SiteTelemetry::parse(site.clone(), &body),
                Err(e) => Err(e),
            };
            (site, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a one-row CSV per site; earlier sites answer more slowly.
    struct SlowFirstUpstream {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl SlowFirstUpstream {
        fn new() -> Self {
            SlowFirstUpstream {
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    impl Upstream for SlowFirstUpstream {
        async fn get_text(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let suffix: u64 = url.trim_start_matches("site-").parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(40 - suffix * 2)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if suffix == 3 {
                return Err(GnssError::UpstreamUnavailable {
                    url: url.to_string(),
                    reason: "offline".to_string(),
                });
            }
            Ok(format!(
                "ET,EASTING,NORTHING,AVG_7DAY_3D_VELOCITY\n01/01/2023 00:00,{suffix},{suffix},0.{suffix}\n"
            ))
        }

        async fn get_bytes(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_blank_body_is_unavailable() {
        for body in ["", "\r\n", "  \n\t"] {
            assert!(matches!(
                non_empty("http://host/x.csv", body.to_string()),
                Err(GnssError::UpstreamUnavailable { .. })
            ));
        }
        // Short but real content is kept.
        assert_eq!(non_empty("http://host/x.csv", "a\n".to_string()).unwrap(), "a\n");
    }

    #[tokio::test]
    async fn test_fetch_sites_preserves_order_and_bounds_concurrency() {
        let upstream = SlowFirstUpstream::new();
        let sites: Vec<Site> = ["00", "01", "02", "03", "04", "05", "06"]
            .iter()
            .map(|s| Site::new(s))
            .collect();
        let results = fetch_sites(&upstream, &sites, "site-{suffix}", 2).await;

        assert_eq!(upstream.calls.load(Ordering::SeqCst), 7);
        assert!(upstream.max_in_flight.load(Ordering::SeqCst) <= 2);
        let names: Vec<String> = results.iter().map(|(s, _)| s.name()).collect();
        assert_eq!(
            names,
            vec!["SITE_00", "SITE_01", "SITE_02", "SITE_03", "SITE_04", "SITE_05", "SITE_06"]
        );
        assert!(results[3].1.is_err());
        let telemetry = results[5].1.as_ref().unwrap();
        assert!((telemetry.latest().unwrap().easting - 5.0).abs() < 1e-9);
    }
}
