use dioxus::prelude::*;
use ui::{GuestOnly, LoginForm};

#[component]
pub fn Login() -> Element {
    rsx! {
        GuestOnly { LoginForm {} }
    }
}
