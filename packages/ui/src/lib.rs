//! This crate contains all shared UI for the workspace.
//!
//! Components read the session through [`use_auth`] and reach the stores
//! through [`use_services`]; both are provided by [`AuthProvider`].

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod platform;
pub use platform::{make_credentials, Client, PlatformStore, Services};

mod auth;
pub use auth::{use_auth, use_services, AuthProvider, LogoutButton, SocialLoginButton};

mod guard;
pub use guard::{GuestOnly, Protected};

mod auth_forms;
pub use auth_forms::{LoginForm, SignupForm};

mod avatar;
pub use avatar::{Avatar, AvatarSize};

mod modal;
pub use modal::Modal;

mod posts;
pub use posts::{PostCard, PostComposer};

mod comments;
pub use comments::CommentSection;

mod profile;
pub use profile::ProfileInfo;
