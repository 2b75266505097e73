use geo::LineString;
use serde::{Deserialize, Serialize};

/// Contour overlay label and colour.
pub const CONTOURS: (&str, &str) = ("Topographic Contours", "rgb(200, 200, 200)");
/// Fault overlay label and colour.
pub const FAULTS: (&str, &str) = ("1S EW Faults", "rgb(255, 0, 0)");

/// Line geometry flattened for a single map trace.
///
/// Each line string is followed by a `None` in both sequences, which the
/// chart draws as a gap between lines.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GeometryFeature {
    pub label: String,
    pub color: String,
    pub lons: Vec<Option<f64>>,
    pub lats: Vec<Option<f64>>,
}

impl GeometryFeature {
    pub fn from_lines(label: &str, color: &str, lines: &[LineString<f64>]) -> Self {
        let capacity = lines.iter().map(|l| l.0.len() + 1).sum();
        let mut lons = Vec::with_capacity(capacity);
        let mut lats = Vec::with_capacity(capacity);
        for line in lines {
            for coord in line.coords() {
                lons.push(Some(coord.x));
                lats.push(Some(coord.y));
            }
            lons.push(None);
            lats.push(None);
        }
        GeometryFeature {
            label: label.to_string(),
            color: color.to_string(),
            lons,
            lats,
        }
    }

    /// Number of lines held.
    pub fn line_count(&self) -> usize {
        self.lons.iter().filter(|v| v.is_none()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }
}
