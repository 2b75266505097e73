use crate::error::{GnssError, Result};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use log::warn;
use pdm_utils::{dates::parse_day_first, numbers::parse_cell};
use serde::{Deserialize, Serialize};

/// Shared blast vibration log.
pub const DEFAULT_BLAST_URL: &str =
    "https://raw.githubusercontent.com/j-ahn/monitoring/main/BlastVibrations.csv";

/// Endwall columns in the blast log and their chart colours.
pub const DEFAULT_ENDWALLS: [(&str, &str); 2] = [("1N Endwall", "Blue"), ("1S Endwall", "Red")];

const DATE_HEADER: &str = "Date";
const BLAST_ID_HEADER: &str = "Blast ID";

/// A single PPV measurement at one endwall for one blast.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BlastRecord {
    pub date: NaiveDateTime,
    pub endwall: String,
    /// Peak particle velocity (mm/s)
    pub ppv: f64,
    pub blast_id: String,
}

/// Parse the wide blast log (`Date`, one PPV column per endwall, `Blast ID`)
/// into one record per row and endwall.
///
/// Blank PPV cells produce no record. Rows with an unreadable date are
/// logged and skipped.
pub fn parse_blast_log(body: &str, endwalls: &[&str]) -> Result<Vec<BlastRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());
    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let date_index = position(DATE_HEADER)
        .ok_or_else(|| GnssError::MissingColumn(DATE_HEADER.to_string()))?;
    let blast_id_index = position(BLAST_ID_HEADER);
    let endwall_indexes: Vec<(&str, usize)> = endwalls
        .iter()
        .filter_map(|endwall| match position(endwall) {
            Some(index) => Some((*endwall, index)),
            None => {
                warn!("Blast log has no column for {}", endwall);
                None
            }
        })
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Blast log: skipping unreadable row: {}", e);
                continue;
            }
        };
        let date = match parse_day_first(record.get(date_index).unwrap_or("")) {
            Ok(d) => d,
            Err(e) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                warn!("Blast log: skipping row at line {}: {}", line, e);
                continue;
            }
        };
        let blast_id = blast_id_index
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .to_string();
        for (endwall, index) in &endwall_indexes {
            if let Some(ppv) = record.get(*index).and_then(parse_cell) {
                records.push(BlastRecord {
                    date,
                    endwall: endwall.to_string(),
                    ppv,
                    blast_id: blast_id.clone(),
                });
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const BODY: &str = "\
Date,1N Endwall,1S Endwall,Blast ID
02/11/2022,1.5,,B101
15/11/2022,0.7,2.25,B102
bad date,9,9,B103
";

    #[test]
    fn test_parse_blast_log_melts_endwalls() {
        let endwalls: Vec<&str> = DEFAULT_ENDWALLS.iter().map(|(name, _)| *name).collect();
        let records = parse_blast_log(BODY, &endwalls).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].endwall, "1N Endwall");
        assert_eq!(records[0].blast_id, "B101");
        assert_eq!(records[0].date.day(), 2);
        assert_eq!(records[0].date.month(), 11);
        assert!((records[0].ppv - 1.5).abs() < 1e-9);

        assert_eq!(records[1].endwall, "1N Endwall");
        assert_eq!(records[2].endwall, "1S Endwall");
        assert_eq!(records[2].blast_id, "B102");
        assert!((records[2].ppv - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_endwall_is_ignored() {
        let records = parse_blast_log(BODY, &["2N Endwall"]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_date_column() {
        let result = parse_blast_log("When,1N Endwall\n01/01/2023,1\n", &["1N Endwall"]);
        assert!(matches!(result, Err(GnssError::MissingColumn(_))));
    }
}
