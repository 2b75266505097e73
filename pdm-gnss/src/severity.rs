use serde::{Deserialize, Serialize};

/// Trigger action response plan tier for a site velocity.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    Green,
    Orange,
    Red,
    Magenta,
}

/// Ascending threshold ladder. A velocity strictly above a threshold takes
/// its tier; later entries override earlier ones.
pub const THRESHOLDS: [(f64, SeverityTier); 3] = [
    (1.0, SeverityTier::Orange),
    (5.0, SeverityTier::Red),
    (10.0, SeverityTier::Magenta),
];

impl SeverityTier {
    /// Classify a velocity. Total: NaN and negatives fall through to green.
    pub fn classify(velocity: f64) -> SeverityTier {
        let mut tier = SeverityTier::Green;
        for (threshold, candidate) in THRESHOLDS {
            if velocity > threshold {
                tier = candidate;
            }
        }
        tier
    }

    /// Marker colour used on the map.
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::Green => "rgb(0, 255, 0)",
            SeverityTier::Orange => "rgb(255, 165, 0)",
            SeverityTier::Red => "rgb(255, 0, 0)",
            SeverityTier::Magenta => "rgb(255, 0, 255)",
        }
    }
}
