//! Geometry for the monitoring map.
//!
//! - `reproject`: local mine grid to WGS84 longitude/latitude
//! - `archive`: line geometry out of zipped shapefiles
//! - `features`: flattening line geometry into map traces

pub mod archive;
pub mod error;
pub mod features;
pub mod reproject;
