//! HTML rendering of the page shell and the auth fragment.

use crate::{
    assets::{BOOTSTRAP_CSS_URL, DASHBOARD_JS_PATH, PLOTLY_JS_URL},
    components::{AuthFrame, ChartCard, DashboardHeader, ErrorDisplay},
    figures::BACKGROUND,
};
use dioxus::prelude::*;

pub const PAGE_TITLE: &str = "PDM Corridor Monitoring";

#[derive(Props, Clone, PartialEq)]
struct DashboardBodyProps {
    authenticated: bool,
    login_failed: bool,
}

#[component]
fn DashboardBody(props: DashboardBodyProps) -> Element {
    rsx! {
        div {
            class: "container-fluid",
            DashboardHeader { authenticated: props.authenticated }
            if props.login_failed {
                ErrorDisplay { message: "Login failed: unknown username or wrong password.".to_string() }
            }
            hr {}
            div {
                class: "row",
                div {
                    class: "col-md-6",
                    ChartCard { title: "Map".to_string(), id: "mapbox".to_string() }
                }
                div {
                    class: "col-md-6",
                    ChartCard { title: "Graph".to_string(), id: "graph".to_string() }
                }
            }
            hr {}
            div { id: "notice-frame" }
        }
    }
}

/// The full dashboard page. Figures are filled in by the browser script.
pub fn render_page(authenticated: bool, login_failed: bool) -> String {
    let body = dioxus_ssr::render_element(rsx! {
        DashboardBody { authenticated, login_failed }
    });
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<link rel="stylesheet" href="{BOOTSTRAP_CSS_URL}">
<script src="{PLOTLY_JS_URL}"></script>
</head>
<body style="background: {BACKGROUND};">
{body}
<script src="{DASHBOARD_JS_PATH}"></script>
</body>
</html>
"#
    )
}

/// Just the login form or logout control, for the `/update` payload.
pub fn render_auth_fragment(authenticated: bool) -> String {
    dioxus_ssr::render_element(rsx! {
        AuthFrame { authenticated }
    })
}
