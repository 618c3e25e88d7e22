use dioxus::prelude::*;
use ui::{GuestOnly, SignupForm};

#[component]
pub fn Signup() -> Element {
    rsx! {
        GuestOnly { SignupForm {} }
    }
}
