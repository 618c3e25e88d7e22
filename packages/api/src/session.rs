//! # Session state: the shared authentication record
//!
//! [`Session`] is the in-memory view of who is logged in. It lives in a
//! [`SessionHandle`], an explicit container created once per app and passed
//! to everyone who needs it (the [`ApiClient`](crate::ApiClient) interceptor,
//! the [`SessionStore`](crate::SessionStore), the views). There is no global.
//!
//! The client runs on a single-threaded event loop, so the handle is an
//! `Rc<RefCell<…>>`. Borrows never outlive a single method call, which lets
//! async operations interleave freely.
//!
//! ## Invariant
//!
//! `is_authenticated` is true only together with `user.is_some()`, and only
//! while an access token sits in the credential store. Every transition that
//! touches one side touches the other in the same step.
//!
//! ## Listeners
//!
//! [`SessionHandle::subscribe`] registers a callback invoked with the new
//! snapshot after every change. The UI uses it to mirror the session into a
//! reactive signal so that a forced logout deep inside a feature call
//! re-renders the guards immediately.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use store::User;

/// Authentication status and identity of the current user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Coarse state machine position derived from a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

impl Session {
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
            error: None,
        }
    }

    /// Logged out, carrying a message for the login screen.
    pub fn anonymous_with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> AuthPhase {
        if self.is_authenticated && self.user.is_some() {
            AuthPhase::Authenticated
        } else if self.loading {
            AuthPhase::Authenticating
        } else {
            AuthPhase::Anonymous
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// Partial update for out-of-band changes (profile edits, avatar uploads).
/// Never changes `is_authenticated`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthPatch {
    pub user: Option<User>,
    pub loading: Option<bool>,
    pub error: Option<Option<String>>,
}

impl AuthPatch {
    pub fn user(user: User) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn clear_error() -> Self {
        Self {
            error: Some(None),
            ..Self::default()
        }
    }
}

type Listener = Rc<dyn Fn(&Session)>;

/// Shared, observable session container.
#[derive(Clone, Default)]
pub struct SessionHandle {
    session: Rc<RefCell<Session>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("session", &*self.session.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().user.clone()
    }

    pub fn replace(&self, session: Session) {
        *self.session.borrow_mut() = session;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut Session)) {
        f(&mut self.session.borrow_mut());
        self.notify();
    }

    /// Call `listener` with every future snapshot.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // Cloned out so a listener may read the handle or subscribe again.
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
