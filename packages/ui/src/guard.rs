//! Route guards. Each renders its children or redirects, re-evaluated on
//! every session change.

use api::routing::{decide, Access, Guard};
use dioxus::prelude::*;

use crate::auth::use_auth;

#[component]
fn RouteGuard(access: Access, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    match decide(access, &auth()) {
        Guard::Render => rsx! { {children} },
        Guard::Redirect(path) => {
            nav.replace(path);
            rsx! {}
        }
    }
}

/// Only for signed-in users; everyone else goes to the login page.
#[component]
pub fn Protected(children: Element) -> Element {
    rsx! {
        RouteGuard { access: Access::Protected, {children} }
    }
}

/// Only for signed-out users (login, signup); signed-in users go home.
#[component]
pub fn GuestOnly(children: Element) -> Element {
    rsx! {
        RouteGuard { access: Access::GuestOnly, {children} }
    }
}
