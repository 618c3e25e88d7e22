use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::ClientConfig;
use ui::AuthProvider;
use views::{Home, Login, NotFound, OAuthCallback, Profile, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/oauth2/callback?:..query")]
    OAuthCallback { query: String },
    #[route("/profile/:id")]
    Profile { id: i64 },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// `flock.toml` as bundled at build time.
const EMBEDDED_CONFIG: &str = include_str!("../flock.toml");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialise logging: {e}");
    }
    dioxus::launch(App);
}

/// Parse the bundled config, letting `FLOCK_API_URL` override the backend.
fn load_config(raw: &str, api_url: Option<&str>) -> ClientConfig {
    let config = match ClientConfig::from_toml(raw) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid {}: {}", ClientConfig::filename(), e);
            ClientConfig::default()
        }
    };
    match api_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(|| load_config(EMBEDDED_CONFIG, option_env!("FLOCK_API_URL")));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }

        AuthProvider {
            config,
            Router::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = load_config(EMBEDDED_CONFIG, None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_api_url_override() {
        let config = load_config(EMBEDDED_CONFIG, Some("https://api.flock.dev/"));
        assert_eq!(config.api.base_url, "https://api.flock.dev");
        assert_eq!(config.limits.max_post_chars, 280);

        let blank = load_config(EMBEDDED_CONFIG, Some("  "));
        assert_eq!(blank.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let config = load_config("[api\nbase_url = ", None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_routes_parse() {
        assert_eq!("/profile/7".parse::<Route>().ok(), Some(Route::Profile { id: 7 }));
        assert_eq!("/login".parse::<Route>().ok(), Some(Route::Login {}));

        let callback = format!("{}?token=a&refreshToken=b", api::routing::OAUTH_CALLBACK_ROUTE);
        assert!(matches!(
            callback.parse::<Route>(),
            Ok(Route::OAuthCallback { query }) if query.contains("token=a")
        ));
    }
}
