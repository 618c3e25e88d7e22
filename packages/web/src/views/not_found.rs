use dioxus::prelude::*;

use crate::Route;

/// Unknown paths fall back to the feed, which redirects to login when needed.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    let path = segments.join("/");
    use_effect(move || {
        tracing::warn!("No route for /{}", path);
        nav.replace(Route::Home {});
    });
    rsx! {}
}
