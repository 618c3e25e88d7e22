//! # Feature stores
//!
//! One store per backend resource. Each wraps a narrow set of endpoints, keeps
//! the last response in memory and exposes a `loading`/`error` pair through
//! its `snapshot()`.
//!
//! | Store | Endpoints |
//! |-------|-----------|
//! | [`PostStore`] | `GET/POST /api/posts`, `PUT/DELETE /api/posts/{id}`, `GET /api/posts/user/{id}[/count]` |
//! | [`CommentStore`] | `GET/POST /api/posts/{id}/comments` |
//! | [`LikeStore`] | `POST /api/posts/{id}/like` |
//! | [`FollowStore`] | `GET /api/follow/{id}/status`, `POST /api/follow/{id}/toggle` |
//! | [`ProfileStore`] | `GET /api/users/{id}`, `PUT /api/users/profile`, `POST /api/upload/profile-image` |
//!
//! Caches are replaced wholesale by each fetch; there is no merging and no
//! cross-store cascade. Toggles take the server's answer verbatim and
//! overlapping toggles resolve to whichever response lands last.

mod comments;
mod follows;
mod likes;
mod posts;
mod profiles;

pub use comments::{CommentState, CommentStore, CommentThread};
pub use follows::{FollowState, FollowStore};
pub use likes::{LikeDisplay, LikeState, LikeStore};
pub use posts::{PostState, PostStore};
pub use profiles::{ImageFile, ProfileState, ProfileStore};

use std::cell::RefCell;
use std::rc::Rc;

/// Shared in-memory state of one store.
#[derive(Debug, Default)]
pub(crate) struct Cache<St> {
    inner: Rc<RefCell<St>>,
}

impl<St> Clone for Cache<St> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<St: Clone> Cache<St> {
    pub(crate) fn snapshot(&self) -> St {
        self.inner.borrow().clone()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut St) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

/// A server value as shown by a view that also receives fresh fetches.
///
/// A mutation response is shown only while the fetched value it was made
/// against is still current; any newer fetch replaces it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ServerValue<V> {
    fetched: V,
    confirmed: Option<V>,
}

impl<V: Copy + PartialEq> ServerValue<V> {
    pub fn new(fetched: V) -> Self {
        Self {
            fetched,
            confirmed: None,
        }
    }

    /// Record a server response to a mutation issued while `fetched` was shown.
    pub fn confirm(&mut self, fetched: V, value: V) {
        self.fetched = fetched;
        self.confirmed = Some(value);
    }

    pub fn resolve(&self, fetched: V) -> V {
        match self.confirmed {
            Some(value) if fetched == self.fetched => value,
            _ => fetched,
        }
    }
}
