//! Plotly figure payloads (`{ data, layout }`) for the map and the graph.

use pdm_geo::features::GeometryFeature;
use pdm_gnss::{blast::BlastRecord, reading::SiteReading, telemetry::SiteTelemetry};
use pdm_utils::{dates::format_for_chart, numbers::mean};
use serde_json::{json, Value};

/// Page and placeholder background.
pub const BACKGROUND: &str = "#f8f5f0";

/// Map zoom level around the site centroid.
pub const MAP_ZOOM: f64 = 15.0;

/// Basemap that needs no access token.
pub const MAP_STYLE: &str = "open-street-map";

fn legend_top_left() -> Value {
    json!({ "yanchor": "top", "y": 0.99, "xanchor": "left", "x": 0.01 })
}

/// Axis styling equivalent to the `simple_white` template.
fn simple_white_axis(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "showline": true,
        "linecolor": "rgb(36,36,36)",
        "ticks": "outside",
        "showgrid": false,
        "zeroline": false,
    })
}

/// An empty figure with a centred title, shown to anonymous users and when
/// upstream data is unavailable.
pub fn placeholder_figure(title: &str) -> Value {
    json!({
        "data": [],
        "layout": {
            "title": {
                "text": title,
                "x": 0.5,
                "y": 0.95,
                "font": { "family": "Arial", "size": 20, "color": "#000000" },
            },
            "paper_bgcolor": BACKGROUND,
            "plot_bgcolor": "white",
            "xaxis": simple_white_axis(""),
            "yaxis": simple_white_axis(""),
        },
    })
}

/// Site markers coloured by severity tier, then the geometry overlays.
pub fn map_figure(readings: &[SiteReading], features: &[GeometryFeature]) -> Value {
    let mut data: Vec<Value> = readings
        .iter()
        .map(|r| {
            json!({
                "type": "scattermap",
                "lat": [r.latitude],
                "lon": [r.longitude],
                "name": r.site,
                "text": r.label(),
                "mode": "markers",
                "marker": { "size": 20, "color": r.tier.color() },
            })
        })
        .collect();
    data.extend(features.iter().map(|f| {
        json!({
            "type": "scattermap",
            "lat": f.lats,
            "lon": f.lons,
            "mode": "lines",
            "name": f.label,
            "line": { "width": 1, "color": f.color },
            "hoverinfo": "skip",
        })
    }));

    let lats: Vec<f64> = readings.iter().map(|r| r.latitude).collect();
    let lons: Vec<f64> = readings.iter().map(|r| r.longitude).collect();
    let mut map = json!({ "style": MAP_STYLE, "zoom": MAP_ZOOM });
    if let (Some(lat), Some(lon)) = (mean(&lats), mean(&lons)) {
        map["center"] = json!({ "lat": lat, "lon": lon });
    }

    json!({
        "data": data,
        "layout": {
            "title": { "text": "GNSS Map" },
            "map": map,
            "legend": legend_top_left(),
            "margin": { "l": 10, "r": 10, "t": 50, "b": 10 },
        },
    })
}

/// Velocity lines per site on the left axis, blast PPV per endwall on the
/// right axis.
///
/// `endwalls` pairs each endwall name with its marker colour.
pub fn timeseries_figure(
    telemetry: &[SiteTelemetry],
    blasts: &[BlastRecord],
    endwalls: &[(String, String)],
) -> Value {
    let mut data: Vec<Value> = telemetry
        .iter()
        .map(|t| {
            let x: Vec<String> = t.rows.iter().map(|r| format_for_chart(&r.timestamp)).collect();
            let y: Vec<f64> = t.rows.iter().map(|r| r.velocity).collect();
            json!({
                "type": "scatter",
                "x": x,
                "y": y,
                "name": t.site.name(),
                "mode": "lines",
                "yaxis": "y",
            })
        })
        .collect();

    let hovertemplate = ["Date: %{x}", "Blast: %{text}", "PPV: %{y} mm/s"].join("<br>");
    for (endwall, color) in endwalls {
        let records: Vec<&BlastRecord> = blasts.iter().filter(|b| &b.endwall == endwall).collect();
        let x: Vec<String> = records.iter().map(|b| format_for_chart(&b.date)).collect();
        let y: Vec<f64> = records.iter().map(|b| b.ppv).collect();
        let text: Vec<&str> = records.iter().map(|b| b.blast_id.as_str()).collect();
        data.push(json!({
            "type": "scatter",
            "x": x,
            "y": y,
            "text": text,
            "hovertemplate": hovertemplate,
            "name": endwall,
            "mode": "markers",
            "yaxis": "y2",
            "marker": { "color": color },
        }));
    }

    let mut yaxis2 = simple_white_axis("Peak Particle Velocity (mm/s)");
    yaxis2["overlaying"] = json!("y");
    yaxis2["side"] = json!("right");

    json!({
        "data": data,
        "layout": {
            "title": { "text": "GNSS Graph" },
            "xaxis": simple_white_axis("Date"),
            "yaxis": simple_white_axis("Average 7 Day Velocity (mm/d)"),
            "yaxis2": yaxis2,
            "plot_bgcolor": "white",
            "legend": legend_top_left(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdm_geo::features::FAULTS;
    use pdm_gnss::{site::Site, telemetry::SiteTelemetry};
    use pdm_utils::dates::parse_day_first;

    fn readings() -> Vec<SiteReading> {
        vec![
            SiteReading::new("SITE_00".to_string(), 148.0, -22.0, 0.5),
            SiteReading::new("SITE_01".to_string(), 148.2, -22.2, 12.0),
        ]
    }

    #[test]
    fn test_placeholder_figure() {
        let figure = placeholder_figure("Please log in");
        assert_eq!(figure["data"].as_array().unwrap().len(), 0);
        assert_eq!(figure["layout"]["title"]["text"], "Please log in");
        assert_eq!(figure["layout"]["paper_bgcolor"], BACKGROUND);
    }

    #[test]
    fn test_map_figure_markers_then_overlays() {
        let feature = GeometryFeature {
            label: FAULTS.0.to_string(),
            color: FAULTS.1.to_string(),
            lons: vec![Some(148.0), Some(148.1), None],
            lats: vec![Some(-22.0), Some(-22.1), None],
        };
        let figure = map_figure(&readings(), &[feature]);
        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["name"], "SITE_00");
        assert_eq!(data[0]["marker"]["color"], "rgb(0, 255, 0)");
        assert_eq!(data[0]["text"], "0.500 mm/d");
        assert_eq!(data[1]["marker"]["color"], "rgb(255, 0, 255)");
        assert_eq!(data[2]["mode"], "lines");
        assert_eq!(data[2]["hoverinfo"], "skip");
        assert!(data[2]["lon"][2].is_null());

        let center = &figure["layout"]["map"]["center"];
        assert!((center["lat"].as_f64().unwrap() + 22.1).abs() < 1e-9);
        assert!((center["lon"].as_f64().unwrap() - 148.1).abs() < 1e-9);
        assert_eq!(figure["layout"]["map"]["zoom"], MAP_ZOOM);
    }

    #[test]
    fn test_map_figure_without_readings_has_no_center() {
        let figure = map_figure(&[], &[]);
        assert!(figure["layout"]["map"]["center"].is_null());
    }

    #[test]
    fn test_timeseries_figure_axes() {
        let body = "ET,EASTING,NORTHING,AVG_7DAY_3D_VELOCITY\n01/11/2022 00:00,1,2,0.3\n02/11/2022 00:00,1,2,0.4\n";
        let telemetry = vec![SiteTelemetry::parse(Site::new("00"), body).unwrap()];
        let blasts = vec![
            BlastRecord {
                date: parse_day_first("03/11/2022").unwrap(),
                endwall: "1N Endwall".to_string(),
                ppv: 1.2,
                blast_id: "B1".to_string(),
            },
            BlastRecord {
                date: parse_day_first("04/11/2022").unwrap(),
                endwall: "1S Endwall".to_string(),
                ppv: 2.4,
                blast_id: "B2".to_string(),
            },
        ];
        let endwalls = vec![
            ("1N Endwall".to_string(), "Blue".to_string()),
            ("1S Endwall".to_string(), "Red".to_string()),
        ];
        let figure = timeseries_figure(&telemetry, &blasts, &endwalls);
        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["name"], "SITE_00");
        assert_eq!(data[0]["yaxis"], "y");
        assert_eq!(data[0]["x"][0], "2022-11-01 00:00:00");
        assert_eq!(data[1]["yaxis"], "y2");
        assert_eq!(data[1]["text"][0], "B1");
        assert_eq!(data[2]["marker"]["color"], "Red");
        assert_eq!(data[2]["y"][0], 2.4);
        assert_eq!(
            data[1]["hovertemplate"],
            "Date: %{x}<br>Blast: %{text}<br>PPV: %{y} mm/s"
        );

        let layout = &figure["layout"];
        assert_eq!(layout["yaxis"]["title"]["text"], "Average 7 Day Velocity (mm/d)");
        assert_eq!(layout["yaxis2"]["overlaying"], "y");
        assert_eq!(layout["yaxis2"]["side"], "right");
    }
}
