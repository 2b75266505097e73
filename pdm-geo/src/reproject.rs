use crate::error::{GeoError, Result};
use log::debug;
use proj4rs::{proj::Proj, transform::transform};
use std::{fs, path::Path};

/// Geographic output frame.
const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Converts local mine grid coordinates to WGS84 longitude/latitude.
pub struct Reprojector {
    source: Proj,
    target: Proj,
    definition: String,
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector")
            .field("definition", &self.definition)
            .finish()
    }
}

/// Drop comment and blank lines and join the rest with spaces.
fn normalise_definition(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Leading keywords of a WKT (ESRI `.prj` or OGC) definition.
const WKT_PREFIXES: [&str; 4] = ["PROJCS", "PROJCRS", "GEOGCS", "GEOGCRS"];

/// Turn a normalised definition into a PROJ string, converting WKT.
fn to_proj_string(definition: &str) -> Result<String> {
    if !WKT_PREFIXES.iter().any(|wkt| definition.starts_with(wkt)) {
        return Ok(definition.to_string());
    }
    let converted = proj4wkt::wkt_to_projstring(definition)
        .map_err(|e| GeoError::Definition(format!("unreadable WKT: {e:?}")))?;
    debug!("Converted WKT to {}", converted);
    Ok(converted)
}

impl Reprojector {
    /// Build from a PROJ string or a WKT definition such as a `.prj` file.
    pub fn from_definition(text: &str) -> Result<Self> {
        let normalised = normalise_definition(text);
        if normalised.is_empty() {
            return Err(GeoError::Definition(String::from("definition is empty")));
        }
        let definition = to_proj_string(&normalised)?;
        if !definition.contains("+proj=") {
            return Err(GeoError::Definition(format!(
                "no +proj= parameter in {definition:?}"
            )));
        }
        let source = Proj::from_proj_string(&definition)
            .map_err(|e| GeoError::Definition(format!("{e:?}")))?;
        let target = Proj::from_proj_string(WGS84_LONGLAT)
            .map_err(|e| GeoError::Definition(format!("{e:?}")))?;
        debug!("Loaded projection {}", definition);
        Ok(Reprojector {
            source,
            target,
            definition,
        })
    }

    /// Read the definition resource from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Reprojector::from_definition(&text)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Transform a grid (x, y) pair into (longitude, latitude) in degrees.
    pub fn to_lon_lat(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let mut point = (x, y, 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| GeoError::Transform {
            x,
            y,
            reason: format!("{e:?}"),
        })?;
        let (lon, lat) = (point.0.to_degrees(), point.1.to_degrees());
        if !lon.is_finite() || !lat.is_finite() {
            return Err(GeoError::Transform {
                x,
                y,
                reason: String::from("result is not finite"),
            });
        }
        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// MGA zone 55 on GRS80.
    const MGA55: &str = "
# GDA94 / MGA zone 55
+proj=utm +zone=55 +south +ellps=GRS80
+towgs84=0,0,0,0,0,0,0 +units=m +no_defs
";

    /// The same grid as an ESRI-style `.prj`.
    const MGA55_WKT: &str = r#"PROJCS["GDA94_MGA_zone_55",
GEOGCS["GCS_GDA_1994",DATUM["D_GDA_1994",SPHEROID["GRS_1980",6378137.0,298.257222101]],
PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],
PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",500000.0],
PARAMETER["False_Northing",10000000.0],PARAMETER["Central_Meridian",147.0],
PARAMETER["Scale_Factor",0.9996],PARAMETER["Latitude_Of_Origin",0.0],UNIT["Meter",1.0]]"#;

    #[test]
    fn test_central_meridian_on_equator() {
        let reprojector = Reprojector::from_definition(MGA55).unwrap();
        let (lon, lat) = reprojector.to_lon_lat(500_000.0, 10_000_000.0).unwrap();
        assert!((lon - 147.0).abs() < 1e-6, "lon {lon}");
        assert!(lat.abs() < 1e-6, "lat {lat}");
    }

    #[test]
    fn test_site_area_lands_in_bowen_basin() {
        let reprojector = Reprojector::from_definition(MGA55).unwrap();
        let (lon, lat) = reprojector.to_lon_lat(620_000.0, 7_540_000.0).unwrap();
        assert!(lon > 148.0 && lon < 148.5, "lon {lon}");
        assert!(lat < -22.0 && lat > -22.5, "lat {lat}");
    }

    #[test]
    fn test_wkt_matches_proj_string() {
        let from_wkt = Reprojector::from_definition(MGA55_WKT).unwrap();
        assert!(from_wkt.definition().contains("+proj="));
        let from_proj = Reprojector::from_definition(MGA55).unwrap();
        for (x, y) in [(500_000.0, 10_000_000.0), (620_000.0, 7_540_000.0)] {
            let (lon_a, lat_a) = from_wkt.to_lon_lat(x, y).unwrap();
            let (lon_b, lat_b) = from_proj.to_lon_lat(x, y).unwrap();
            assert!((lon_a - lon_b).abs() < 1e-6, "lon {lon_a} vs {lon_b}");
            assert!((lat_a - lat_b).abs() < 1e-6, "lat {lat_a} vs {lat_b}");
        }
    }

    #[test]
    fn test_prj_fixture_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/PDMG.prj");
        let reprojector = Reprojector::from_file(path).unwrap();
        let (lon, lat) = reprojector.to_lon_lat(620_000.0, 7_540_000.0).unwrap();
        assert!(lon > 148.0 && lon < 148.5, "lon {lon}");
        assert!(lat < -22.0 && lat > -22.5, "lat {lat}");
    }

    #[test]
    fn test_reprojection_is_deterministic() {
        let reprojector = Reprojector::from_definition(MGA55).unwrap();
        let first = reprojector.to_lon_lat(612_345.6, 7_543_210.9).unwrap();
        let second = reprojector.to_lon_lat(612_345.6, 7_543_210.9).unwrap();
        assert_eq!(first, second);

        let rebuilt = Reprojector::from_definition(MGA55).unwrap();
        assert_eq!(rebuilt.to_lon_lat(612_345.6, 7_543_210.9).unwrap(), first);
    }

    #[test]
    fn test_definition_is_normalised() {
        let reprojector = Reprojector::from_definition(MGA55).unwrap();
        assert!(reprojector.definition().starts_with("+proj=utm"));
        assert!(!reprojector.definition().contains('#'));
    }

    #[test]
    fn test_malformed_definitions() {
        assert!(matches!(
            Reprojector::from_definition("   \n# only a comment\n"),
            Err(GeoError::Definition(_))
        ));
        assert!(matches!(
            Reprojector::from_definition("PROJCS[\"GDA94 / MGA zone 55\","),
            Err(GeoError::Definition(_))
        ));
        assert!(matches!(
            Reprojector::from_definition("+ellps=GRS80"),
            Err(GeoError::Definition(_))
        ));
    }

    #[test]
    fn test_fixture_definition_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/PDMG.proj4");
        let reprojector = Reprojector::from_file(path).unwrap();
        let (lon, lat) = reprojector.to_lon_lat(620_000.0, 7_540_000.0).unwrap();
        assert!(lon > 147.0 && lon < 149.0);
        assert!(lat < -21.0 && lat > -23.0);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Reprojector::from_file("/nonexistent/PDMG.proj4"),
            Err(GeoError::Io(_))
        ));
    }
}
