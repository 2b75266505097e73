//! Static assets served alongside the page.
//!
//! The browser script is plain JavaScript with no module system. It posts to
//! `/update`, hands the returned figures to Plotly, and swaps the auth frame.

/// Embedded at compile time.
pub static DASHBOARD_JS: &str = include_str!("../assets/js/dashboard.js");

/// Route the page loads the script from.
pub const DASHBOARD_JS_PATH: &str = "/assets/dashboard.js";

/// Plotly build with `scattermap` support (MapLibre, no token needed).
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Sandstone bootstrap theme.
pub const BOOTSTRAP_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/sandstone/bootstrap.min.css";
