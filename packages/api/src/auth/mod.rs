//! Authentication: the session state machine and social login helpers.

pub mod oauth;
mod store;

pub use oauth::Provider;
pub use store::{SessionStore, LOGIN_PATH, REGISTER_PATH};
