use crate::{
    error::{GnssError, Result},
    site::Site,
};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;
use pdm_utils::{dates::parse_day_first, numbers::parse_cell};
use serde::{Deserialize, Serialize};

/// Header names recognised for each column, checked case-insensitively.
const TIMESTAMP_HEADERS: [&str; 1] = ["ET"];
const EASTING_HEADERS: [&str; 3] = ["EASTING", "E", "X"];
const NORTHING_HEADERS: [&str; 3] = ["NORTHING", "N", "Y"];
const VELOCITY_HEADERS: [&str; 1] = ["AVG_7DAY_3D_VELOCITY"];

/// Historical column positions, used only when a header is not found.
const FALLBACK_TIMESTAMP: usize = 0;
const FALLBACK_EASTING: usize = 1;
const FALLBACK_NORTHING: usize = 2;
const FALLBACK_VELOCITY: usize = 16;

/// One row of a site's 12-hourly download.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TelemetryRow {
    pub timestamp: NaiveDateTime,
    /// Local mine grid easting (m)
    pub easting: f64,
    /// Local mine grid northing (m)
    pub northing: f64,
    /// 7-day average 3D velocity (mm/day)
    pub velocity: f64,
}

/// Column positions resolved from a header row.
#[derive(Debug, PartialEq, Clone, Copy)]
struct ColumnLayout {
    timestamp: usize,
    easting: usize,
    northing: usize,
    velocity: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<ColumnLayout> {
        let find = |names: &[&str], fallback: usize| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
                .unwrap_or(fallback)
        };
        let layout = ColumnLayout {
            timestamp: find(&TIMESTAMP_HEADERS, FALLBACK_TIMESTAMP),
            easting: find(&EASTING_HEADERS, FALLBACK_EASTING),
            northing: find(&NORTHING_HEADERS, FALLBACK_NORTHING),
            velocity: find(&VELOCITY_HEADERS, FALLBACK_VELOCITY),
        };
        for (label, index) in [
            ("ET", layout.timestamp),
            ("easting", layout.easting),
            ("northing", layout.northing),
            ("AVG_7DAY_3D_VELOCITY", layout.velocity),
        ] {
            if index >= headers.len() {
                return Err(GnssError::MissingColumn(label.to_string()));
            }
        }
        Ok(layout)
    }

    fn row(&self, record: &StringRecord) -> Result<TelemetryRow> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let cell = |index: usize| record.get(index).unwrap_or("");
        let number = |index: usize, label: &str| {
            parse_cell(cell(index)).ok_or_else(|| GnssError::MalformedRecord {
                line,
                reason: format!("{label} {:?} is not a number", cell(index)),
            })
        };
        let timestamp =
            parse_day_first(cell(self.timestamp)).map_err(|e| GnssError::MalformedRecord {
                line,
                reason: e.to_string(),
            })?;
        Ok(TelemetryRow {
            timestamp,
            easting: number(self.easting, "easting")?,
            northing: number(self.northing, "northing")?,
            velocity: number(self.velocity, "velocity")?,
        })
    }
}

/// All parsed rows for one site, oldest first.
#[derive(Debug, Clone)]
pub struct SiteTelemetry {
    pub site: Site,
    pub rows: Vec<TelemetryRow>,
}

impl SiteTelemetry {
    /// Parse a site CSV body. Malformed rows are logged and skipped.
    pub fn parse(site: Site, body: &str) -> Result<SiteTelemetry> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(body.as_bytes());
        let layout = ColumnLayout::from_headers(rdr.headers()?)?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("{}: skipping unreadable row: {}", site.name(), e);
                    continue;
                }
            };
            match layout.row(&record) {
                Ok(row) => rows.push(row),
                Err(e) => warn!("{}: skipping row: {}", site.name(), e),
            }
        }
        // Stable: rows sharing a timestamp keep file order, so the last one wins.
        rows.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(SiteTelemetry { site, rows })
    }

    /// The most recent row by timestamp.
    pub fn latest(&self) -> Option<&TelemetryRow> {
        self.rows.last()
    }
}
