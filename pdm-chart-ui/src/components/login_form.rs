//! Username/password form posting to `/login`.

use dioxus::prelude::*;

const INPUT_STYLE: &str =
    "height: 35px; width: 100px; display: inline-block; margin-left: 5px; vertical-align: middle;";

#[component]
pub fn LoginForm() -> Element {
    rsx! {
        form {
            action: "/login",
            method: "post",
            div {
                class: "row g-1 align-items-center",
                div {
                    class: "col",
                    input {
                        placeholder: "username",
                        name: "username",
                        r#type: "text",
                        style: INPUT_STYLE,
                    }
                }
                div {
                    class: "col",
                    input {
                        placeholder: "password",
                        name: "password",
                        r#type: "password",
                        style: INPUT_STYLE,
                    }
                }
                div {
                    class: "col",
                    button {
                        r#type: "submit",
                        class: "btn btn-success",
                        "Login"
                    }
                }
            }
        }
    }
}
