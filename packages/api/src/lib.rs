//! # API crate: the Flock client core
//!
//! Everything the views need to talk to the Flock backend, independent of any
//! UI framework. The crate is single-threaded by construction: shared state
//! lives in `Rc<RefCell<_>>` containers and futures are driven by the browser
//! event loop (or `tokio`'s current-thread runtime in tests).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`SessionStore`]: login, register, logout, explicit refresh, social login |
//! | [`client`] | [`ApiClient`]: bearer attachment and forced logout on `401`/`403` |
//! | [`error`] | [`ApiError`] taxonomy and user-facing messages |
//! | [`routing`] | Route guard decisions over a session snapshot |
//! | [`session`] | [`Session`] state and the shared [`SessionHandle`] |
//! | [`stores`] | Posts, comments, likes, follows and profiles |
//! | [`transport`] | The [`Transport`] seam and its `reqwest` implementation |
//! | [`validate`] | Client-side checks run before any request is built |
//!
//! ## Wiring
//!
//! ```ignore
//! let config = store::ClientConfig::default();
//! let client = ApiClient::new(
//!     HttpTransport::new(&config.api.base_url),
//!     store::MemoryStore::new(),
//!     config,
//! );
//! let session = SessionStore::new(client.clone());
//! session.rehydrate();
//! let posts = PostStore::new(client);
//! ```

pub mod auth;
pub mod client;
pub mod error;
#[cfg(test)]
mod mock;
pub mod routing;
pub mod session;
pub mod stores;
pub mod transport;
pub mod validate;

pub use auth::{Provider, SessionStore};
pub use client::{ApiClient, SESSION_EXPIRED};
pub use error::ApiError;
pub use routing::{Access, Guard};
pub use session::{AuthPatch, AuthPhase, Session, SessionHandle};
pub use stores::{
    CommentState, CommentStore, CommentThread, FollowState, FollowStore, ImageFile, LikeDisplay,
    LikeState, LikeStore, PostState, PostStore, ProfileState, ProfileStore, ServerValue,
};
pub use transport::{HttpTransport, Transport};

pub use store::{ClientConfig, User};
