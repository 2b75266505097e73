//! Sticky navbar: logo, coloured title, update trigger, auth frame.

use super::AuthFrame;
use dioxus::prelude::*;

/// Brand orange, red and blue.
const BRAND_ORANGE: &str = "#f7923a";
const BRAND_RED: &str = "#ee3b34";
const BRAND_BLUE: &str = "#004890";

const LOGO_URL: &str = "https://raw.githubusercontent.com/j-ahn/misc/main/logo.png";

#[derive(Props, Clone, PartialEq)]
pub struct DashboardHeaderProps {
    pub authenticated: bool,
}

#[component]
pub fn DashboardHeader(props: DashboardHeaderProps) -> Element {
    rsx! {
        nav {
            class: "navbar sticky-top navbar-light",
            div {
                class: "container-fluid",
                div {
                    class: "row align-items-center w-100",
                    div {
                        class: "col-md-auto",
                        img { id: "logo", src: LOGO_URL, height: "65px", alt: "logo" }
                    }
                    div {
                        class: "col-md-auto",
                        id: "app-title",
                        h3 {
                            span { style: "color: {BRAND_ORANGE};", "PDM " }
                            span { style: "color: {BRAND_RED};", "Corridor " }
                            span { style: "color: {BRAND_BLUE};", "Monitoring " }
                        }
                        h5 { "BMA Geotechnical Services" }
                    }
                    div {
                        class: "col",
                        style: "text-align: center;",
                        button {
                            id: "update_button",
                            r#type: "button",
                            class: "btn btn-primary",
                            style: "margin: 5px;",
                            "Update Graph"
                        }
                    }
                    div {
                        class: "col-md-auto",
                        id: "custom-auth-frame-1",
                        style: "text-align: center;",
                        AuthFrame { authenticated: props.authenticated }
                    }
                }
            }
        }
    }
}
