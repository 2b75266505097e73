use crate::error::{GeoError, Result};
use geo::LineString;
use log::debug;
use shapefile::{Shape, ShapeReader};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Extract every line string from the first `.shp` member of a zip archive.
///
/// Coordinates are taken as stored; the archives are expected to already be
/// in longitude/latitude.
pub fn lines_from_zip(bytes: &[u8]) -> Result<Vec<LineString<f64>>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let shp_name = archive
        .file_names()
        .find(|name| name.to_lowercase().ends_with(".shp"))
        .map(str::to_string)
        .ok_or(GeoError::MissingShapefile)?;
    debug!("Reading {} from archive", shp_name);

    let mut buffer = Vec::new();
    archive.by_name(&shp_name)?.read_to_end(&mut buffer)?;
    let shapes = ShapeReader::new(Cursor::new(buffer))?.read()?;
    Ok(lines_from_shapes(shapes))
}

/// Keep polyline parts as line strings. Every other shape type is skipped.
pub fn lines_from_shapes(shapes: Vec<Shape>) -> Vec<LineString<f64>> {
    let mut lines = Vec::new();
    for shape in shapes {
        match shape {
            Shape::Polyline(polyline) => lines.extend(
                polyline
                    .parts()
                    .iter()
                    .map(|part| part.iter().map(|p| (p.x, p.y)).collect::<LineString<f64>>()),
            ),
            Shape::PolylineM(polyline) => lines.extend(
                polyline
                    .parts()
                    .iter()
                    .map(|part| part.iter().map(|p| (p.x, p.y)).collect::<LineString<f64>>()),
            ),
            Shape::PolylineZ(polyline) => lines.extend(
                polyline
                    .parts()
                    .iter()
                    .map(|part| part.iter().map(|p| (p.x, p.y)).collect::<LineString<f64>>()),
            ),
            other => debug!("Skipping {:?} shape", other.shapetype()),
        }
    }
    lines
}
