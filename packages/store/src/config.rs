//! # Client configuration: `flock.toml`
//!
//! Defines the TOML configuration the client is built with (filename:
//! [`ClientConfig::filename`] = `"flock.toml"`). It tells the API layer where
//! the backend lives and carries the client-side validation limits the forms
//! enforce before a request is issued.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! me_path = "/api/auth/me"           # user lookup after an OAuth redirect
//! refresh_path = "/api/auth/refresh" # explicit token refresh
//!
//! [limits]
//! max_post_chars = 280
//! max_comment_chars = 280
//! max_image_bytes = 5242880
//! max_full_name_chars = 100
//! max_bio_chars = 160
//!
//! [feed]
//! page_size = 10
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation, builder helper `with_base_url`, and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL and the two auxiliary auth paths. |
//! | [`LimitsConfig`] | Character and byte limits for posts, comments, profiles and avatars. |
//! | [`FeedConfig`] | Page size used for feed and profile post lists. |
//!
//! All structs implement `Default` with production values so that a missing or
//! empty config file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `flock.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the REST backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Endpoint returning the current user for a bearer token.
    #[serde(default = "default_me_path")]
    pub me_path: String,
    /// Endpoint exchanging a refresh token for a new token pair.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_me_path() -> String {
    "/api/auth/me".to_string()
}

fn default_refresh_path() -> String {
    "/api/auth/refresh".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            me_path: default_me_path(),
            refresh_path: default_refresh_path(),
        }
    }
}

/// Client-side validation limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_text_limit")]
    pub max_post_chars: usize,
    #[serde(default = "default_text_limit")]
    pub max_comment_chars: usize,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    #[serde(default = "default_max_full_name_chars")]
    pub max_full_name_chars: usize,
    #[serde(default = "default_max_bio_chars")]
    pub max_bio_chars: usize,
}

fn default_text_limit() -> usize {
    280
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_max_full_name_chars() -> usize {
    100
}

fn default_max_bio_chars() -> usize {
    160
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_post_chars: default_text_limit(),
            max_comment_chars: default_text_limit(),
            max_image_bytes: default_max_image_bytes(),
            max_full_name_chars: default_max_full_name_chars(),
            max_bio_chars: default_max_bio_chars(),
        }
    }
}

/// Feed pagination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "flock.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
