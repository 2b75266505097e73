//! Dioxus RSX components for the dashboard, rendered server-side.

mod auth_frame;
mod chart_card;
mod dashboard_header;
mod error_display;
mod login_form;
mod logout_form;

pub use auth_frame::AuthFrame;
pub use chart_card::ChartCard;
pub use dashboard_header::DashboardHeader;
pub use error_display::ErrorDisplay;
pub use login_form::LoginForm;
pub use logout_form::LogoutForm;
