//! Single-button form posting to `/logout`.

use dioxus::prelude::*;

#[component]
pub fn LogoutForm() -> Element {
    rsx! {
        form {
            action: "/logout",
            method: "post",
            button {
                r#type: "submit",
                class: "btn btn-danger",
                "Logout"
            }
        }
    }
}
