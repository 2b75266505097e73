//! Presentation layer for the PDM corridor monitoring dashboard.
//!
//! This crate provides:
//! - `figures`: Plotly figure payloads built with `serde_json`
//! - `components`: Dioxus RSX components rendered to HTML on the server
//! - `page`: the page shell and auth fragment as HTML strings
//! - `assets`: the browser script that requests and draws the figures

pub mod assets;
pub mod components;
pub mod figures;
pub mod page;
