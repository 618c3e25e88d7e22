//! Authentication context and hooks for the UI.

use api::{ClientConfig, Provider, Session};
use dioxus::prelude::*;

use crate::icons::FaRightFromBracket;
use crate::platform::Services;
use crate::Icon;

/// Get the current session.
/// Returns a signal that updates on login, logout and forced logout.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the stores shared by every view.
pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Provider component that owns the session.
///
/// Builds the stores from `config`, restores any stored credentials once and
/// mirrors every session change into a signal so forced logouts re-render
/// the whole tree.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let services = use_hook(|| Services::new(config.clone()));
    let auth_state = use_signal(|| services.session.rehydrate());

    use_hook({
        let handle = services.session.handle().clone();
        move || {
            handle.subscribe(move |session| {
                let mut auth_state = auth_state;
                if *auth_state.peek() != *session {
                    auth_state.set(session.clone());
                }
            });
        }
    });

    use_context_provider(|| services);
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button starting a social login with one provider.
#[component]
pub fn SocialLoginButton(
    provider: Provider,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let mut redirecting = use_signal(|| false);
    let label = provider.label();

    let onclick = move |_| {
        let url = services.session.oauth_authorization_url(provider);
        redirecting.set(true);
        tracing::info!("Starting {} login", provider);
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&url) {
                    tracing::error!("Failed to redirect: {:?}", e);
                    redirecting.set(false);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(e) = open::that(&url) {
                tracing::error!("Failed to open browser: {}", e);
            }
            redirecting.set(false);
        }
    };

    rsx! {
        button {
            class: "social-btn social-btn--{provider} {class}",
            disabled: redirecting(),
            onclick: onclick,
            if redirecting() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let nav = use_navigator();

    let onclick = move |_| {
        services.session.logout();
        nav.replace(api::routing::LOGIN_ROUTE);
    };

    rsx! {
        button {
            class: "{class}",
            title: "{label}",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
    }
}
