use dioxus::prelude::*;

use api::routing::{HOME_ROUTE, LOGIN_ROUTE};
use ui::use_services;

/// Landing page for the provider redirect. Stores the tokens carried in the
/// query string, loads the user and leaves for the feed or the login page.
#[component]
pub fn OAuthCallback(query: String) -> Element {
    let services = use_services();
    let nav = use_navigator();

    use_hook(move || {
        let session = services.session.clone();
        let callback = format!("?{query}");
        spawn(async move {
            match session.complete_oauth(&callback).await {
                Ok(user) => {
                    tracing::info!("Signed in via OAuth as {}", user.username);
                    nav.replace(HOME_ROUTE);
                }
                Err(e) => {
                    tracing::warn!("OAuth sign-in failed: {}", e);
                    nav.replace(LOGIN_ROUTE);
                }
            }
        });
    });

    rsx! {
        div {
            class: "callback",
            p { "Signing you in..." }
        }
    }
}
