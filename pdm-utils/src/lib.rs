//! Shared utility functions for PDM monitoring crates.

/// Date utility functions
pub mod dates {
    use super::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    /// Formats tried for timestamps carrying a time of day, day first.
    ///
    /// Two-digit years come first: chrono's `%Y` also accepts "23" and would
    /// read it as year 23.
    const DAY_FIRST_DATETIME_FORMATS: [&str; 8] = [
        "%d/%m/%y %H:%M:%S",
        "%d/%m/%y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%d-%m-%Y %H:%M:%S",
        "%d-%m-%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];

    /// Formats tried for bare dates, day first.
    const DAY_FIRST_DATE_FORMATS: [&str; 5] =
        ["%d/%m/%y", "%d-%m-%y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

    /// Format used when handing timestamps to the browser charts.
    pub const CHART_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Parse a day-first timestamp such as "26/11/2022 12:00".
    ///
    /// Bare dates resolve to midnight. ISO dates are accepted as a fallback
    /// because they are unambiguous.
    pub fn parse_day_first(s: &str) -> Result<NaiveDateTime, DateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError(String::from("empty timestamp")));
        }
        for format in DAY_FIRST_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(dt);
            }
        }
        for format in DAY_FIRST_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date.and_time(NaiveTime::MIN));
            }
        }
        Err(DateError(format!("unrecognised day-first timestamp {trimmed:?}")))
    }

    /// Format a timestamp as "YYYY-MM-DD HH:MM:SS" for chart axes.
    pub fn format_for_chart(dt: &NaiveDateTime) -> String {
        dt.format(CHART_FORMAT).to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Datelike, NaiveDate, Timelike};

        #[test]
        fn test_parse_day_first_with_time() {
            let dt = parse_day_first("03/11/2022 12:30").unwrap();
            assert_eq!(dt.day(), 3);
            assert_eq!(dt.month(), 11);
            assert_eq!(dt.year(), 2022);
            assert_eq!(dt.hour(), 12);
            assert_eq!(dt.minute(), 30);
        }

        #[test]
        fn test_parse_day_first_with_seconds() {
            let dt = parse_day_first(" 26/11/2022 00:00:15 ").unwrap();
            assert_eq!(dt.day(), 26);
            assert_eq!(dt.second(), 15);
        }

        #[test]
        fn test_parse_day_first_date_only() {
            let dt = parse_day_first("01/02/2023").unwrap();
            let expected = NaiveDate::from_ymd_opt(2023, 2, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            assert_eq!(dt, expected);
        }

        #[test]
        fn test_parse_two_digit_year() {
            let expected = NaiveDate::from_ymd_opt(2023, 2, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            assert_eq!(parse_day_first("01/02/23").unwrap(), expected);
            assert_eq!(parse_day_first("01-02-23").unwrap(), expected);

            let dt = parse_day_first("26/11/22 06:45").unwrap();
            assert_eq!(dt.year(), 2022);
            assert_eq!(dt.day(), 26);
            assert_eq!(dt.hour(), 6);
        }

        #[test]
        fn test_parse_iso_fallback() {
            let dt = parse_day_first("2023-02-01 06:00:00").unwrap();
            assert_eq!(dt.month(), 2);
            assert_eq!(dt.day(), 1);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_day_first("").is_err());
            assert!(parse_day_first("not a date").is_err());
            assert!(parse_day_first("31/02/2023").is_err());
        }

        #[test]
        fn test_format_for_chart() {
            let dt = parse_day_first("05/06/2023 07:08:09").unwrap();
            assert_eq!(format_for_chart(&dt), "2023-06-05 07:08:09");
        }
    }
}

/// Numeric helpers
pub mod numbers {
    /// Parse a CSV cell as f64, treating blanks and NaN markers as absent.
    pub fn parse_cell(s: &str) -> Option<f64> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "nan" | "na" | "n/a" | "null" | "---" => None,
            other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Arithmetic mean, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

}

/// Error types
pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq)]
    #[error("Date error: {0}")]
    pub struct DateError(pub String);
}
