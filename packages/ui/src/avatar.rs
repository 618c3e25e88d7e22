use dioxus::prelude::*;
use store::User;

use crate::auth::use_services;
use crate::icons::FaUser;
use crate::Icon;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AvatarSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl AvatarSize {
    fn class(&self) -> &'static str {
        match self {
            AvatarSize::Small => "avatar avatar--small",
            AvatarSize::Medium => "avatar avatar--medium",
            AvatarSize::Large => "avatar avatar--large",
        }
    }

    fn icon(&self) -> u32 {
        match self {
            AvatarSize::Small => 16,
            AvatarSize::Medium => 20,
            AvatarSize::Large => 40,
        }
    }
}

/// Upload URLs come back relative to the backend origin.
fn image_url(base_url: &str, url: &str) -> Option<String> {
    if url.is_empty() {
        None
    } else if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        Some(format!("{}{}", base_url.trim_end_matches('/'), url))
    }
}

/// Profile picture, or a placeholder icon when the user has none.
#[component]
pub fn Avatar(user: Option<User>, #[props(default)] size: AvatarSize) -> Element {
    let services = use_services();
    let image = user
        .as_ref()
        .and_then(|u| u.profile_image_url.as_deref())
        .and_then(|url| image_url(&services.config().api.base_url, url));
    let alt = user.as_ref().map(|u| u.username.clone()).unwrap_or_else(|| "User".to_string());

    rsx! {
        div {
            class: size.class(),
            if let Some(src) = image {
                img { src: "{src}", alt: "{alt}" }
            } else {
                div {
                    class: "avatar__placeholder",
                    Icon { icon: FaUser, width: size.icon(), height: size.icon() }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("http://localhost:8080/", "/uploads/a.png").as_deref(),
            Some("http://localhost:8080/uploads/a.png")
        );
        assert_eq!(
            image_url("http://localhost:8080", "https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(image_url("http://localhost:8080", ""), None);
    }
}
