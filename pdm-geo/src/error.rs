/// Error types for reprojection and geometry loading
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    /// The projection definition could not be parsed
    #[error("Invalid projection definition: {0}")]
    Definition(String),

    /// A point could not be transformed
    #[error("Failed to transform ({x}, {y}): {reason}")]
    Transform { x: f64, y: f64, reason: String },

    /// Failed to read a local resource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip archive is unreadable
    #[error("Failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The shapefile inside the archive is unreadable
    #[error("Failed to read shapefile: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// The archive holds no `.shp` member
    #[error("Archive contains no .shp file")]
    MissingShapefile,
}

pub type Result<T> = std::result::Result<T, GeoError>;
