/// Error types for GNSS and blast data
use thiserror::Error;

/// Main error type for fetching and parsing monitoring data
#[derive(Error, Debug)]
pub enum GnssError {
    /// The upstream host could not be reached or returned nothing usable
    #[error("Upstream data unavailable from {url}: {reason}")]
    UpstreamUnavailable { url: String, reason: String },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A single row could not be interpreted
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

/// Type alias for Results using GnssError
pub type Result<T> = std::result::Result<T, GnssError>;
