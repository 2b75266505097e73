use crate::severity::SeverityTier;
use serde::{Deserialize, Serialize};

/// The latest state of one site, ready for the map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SiteReading {
    pub site: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Latest 7-day average velocity (mm/day)
    pub velocity: f64,
    pub tier: SeverityTier,
}

impl SiteReading {
    /// Build a reading, deriving the tier from the unrounded velocity.
    pub fn new(site: String, longitude: f64, latitude: f64, velocity: f64) -> Self {
        SiteReading {
            site,
            longitude,
            latitude,
            velocity,
            tier: SeverityTier::classify(velocity),
        }
    }

    /// Hover label for the map marker.
    pub fn label(&self) -> String {
        format!("{:.3} mm/d", self.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_derives_tier() {
        let reading = SiteReading::new("SITE_00".to_string(), 148.1, -22.2, 6.12345);
        assert_eq!(reading.tier, SeverityTier::Red);
        assert_eq!(reading.label(), "6.123 mm/d");
    }
}
