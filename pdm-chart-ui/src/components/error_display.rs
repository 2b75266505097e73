use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Danger alert shown above the charts after a rejected login.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            class: "alert alert-danger py-2 my-2",
            role: "alert",
            "{props.message}"
        }
    }
}
