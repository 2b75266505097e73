//! Login or logout control depending on session state.

use super::{LoginForm, LogoutForm};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct AuthFrameProps {
    /// Whether the request carried a valid session
    pub authenticated: bool,
}

#[component]
pub fn AuthFrame(props: AuthFrameProps) -> Element {
    rsx! {
        if props.authenticated {
            LogoutForm {}
        } else {
            LoginForm {}
        }
    }
}
