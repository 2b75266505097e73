//! Card wrapping a Plotly chart container.

use dioxus::prelude::*;

/// Props for ChartCard
#[derive(Props, Clone, PartialEq)]
pub struct ChartCardProps {
    /// Card header text
    pub title: String,
    /// The DOM id Plotly renders into
    pub id: String,
}

#[component]
pub fn ChartCard(props: ChartCardProps) -> Element {
    rsx! {
        div {
            class: "card bg-light",
            div {
                class: "card-header",
                style: "font-weight: bold;",
                "{props.title}"
            }
            div {
                id: "{props.id}",
                style: "height: 80vh; width: 100%;",
            }
        }
    }
}
