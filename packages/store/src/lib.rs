pub mod config;
pub mod credentials;
pub mod models;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::ClientConfig;
pub use credentials::CredentialStore;
pub use models::{
    AuthResponse, AuthTokens, Comment, FollowStatus, LikeStatus, Page, Post, User,
};
