//! # Session store: login, register, logout, rehydrate, refresh
//!
//! [`SessionStore`] drives the authentication state machine on top of an
//! [`ApiClient`]:
//!
//! ```text
//! ANONYMOUS ──login/register/oauth──▶ AUTHENTICATING ──ok──▶ AUTHENTICATED
//!     ▲                                   │ err                   │
//!     └───────────────────────────────────┘                       │
//!     └──────── logout / 401 / refresh failure ───────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Credentials are written only after the server accepted them, as one
//!   batch. A failed login leaves storage exactly as it was.
//! - [`logout`](SessionStore::logout) clears every key even with no active
//!   session.
//! - [`rehydrate`](SessionStore::rehydrate) trusts a stored token without a
//!   round trip; the first unauthorized response tears it down through the
//!   client interceptor.
//! - Failures come back as `Err` with the message already stored in
//!   [`Session::error`]; nothing panics and nothing is retried.

use store::models::{AuthResponse, RefreshRequest, RegisterRequest};
use store::{CredentialStore, User};

use super::oauth::{self, Provider};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::{AuthPatch, Session, SessionHandle};
use crate::transport::{ApiRequest, Transport};
use crate::validate;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

#[derive(Clone)]
pub struct SessionStore<T, S> {
    client: ApiClient<T, S>,
}

impl<T, S> SessionStore<T, S>
where
    T: Transport,
    S: CredentialStore,
{
    pub fn new(client: ApiClient<T, S>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T, S> {
        &self.client
    }

    pub fn handle(&self) -> &SessionHandle {
        self.client.session()
    }

    pub fn snapshot(&self) -> Session {
        self.handle().snapshot()
    }

    /// Restore the session from durable storage. Called once at startup.
    pub fn rehydrate(&self) -> Session {
        let credentials = self.client.credentials();
        let session = match (credentials.access_token(), credentials.user()) {
            (Some(_), Some(user)) => {
                tracing::info!("Restored session for {}", user.username);
                Session::authenticated(user)
            }
            (None, None) if credentials.refresh_token().is_none() => Session::default(),
            _ => {
                tracing::warn!("Discarding incomplete stored credentials");
                credentials.clear();
                Session::default()
            }
        };
        self.handle().replace(session.clone());
        session
    }

    /// Log in with an email or a username, decided by the input's shape.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, ApiError> {
        let body = validate::validate_login(identifier, password)?;
        let previous = self.begin();
        let result = self
            .client
            .call::<AuthResponse>(ApiRequest::post(LOGIN_PATH).json(&body))
            .await;
        self.finish(previous, result)
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<User, ApiError> {
        validate::validate_registration(form)?;
        let previous = self.begin();
        let result = self
            .client
            .call::<AuthResponse>(ApiRequest::post(REGISTER_PATH).json(form))
            .await;
        self.finish(previous, result)
    }

    /// Drop every credential and return to anonymous. Never fails.
    pub fn logout(&self) {
        self.client.credentials().clear();
        self.handle().replace(Session::default());
        tracing::info!("Logged out");
    }

    /// Merge out-of-band changes without touching the authentication status.
    /// A user patch on an anonymous session is ignored.
    pub fn set_auth(&self, patch: AuthPatch) {
        let credentials = self.client.credentials();
        self.handle().update(|session| {
            if let Some(user) = patch.user {
                if session.is_authenticated {
                    credentials.save_user(&user);
                    session.user = Some(user);
                } else {
                    tracing::warn!("Ignoring user update on an anonymous session");
                }
            }
            if let Some(loading) = patch.loading {
                session.loading = loading;
            }
            if let Some(error) = patch.error {
                session.error = error;
            }
        });
    }

    /// Exchange the stored refresh token for a new pair. Only ever invoked
    /// explicitly; a failure ends the session.
    pub async fn refresh(&self) -> Result<User, ApiError> {
        let Some(refresh_token) = self.client.credentials().refresh_token() else {
            let message = "No refresh token available";
            self.client.force_logout(message);
            return Err(ApiError::Auth {
                status: 401,
                message: message.to_string(),
            });
        };
        let path = self.client.config().api.refresh_path.clone();
        let result = self
            .client
            .call::<AuthResponse>(ApiRequest::post(path).json(&RefreshRequest { refresh_token }))
            .await;
        match result {
            Ok(response) => Ok(self.establish(response)),
            Err(e) => {
                if self.handle().is_authenticated() || self.client.credentials().access_token().is_some() {
                    self.client.force_logout(&e.user_message());
                }
                Err(e)
            }
        }
    }

    pub fn oauth_authorization_url(&self, provider: Provider) -> String {
        oauth::authorization_url(&self.client.config().api.base_url, provider)
    }

    /// Finish a social login from the `/oauth2/callback` URL.
    pub async fn complete_oauth(&self, callback: &str) -> Result<User, ApiError> {
        let tokens = match oauth::parse_callback(callback) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.client.credentials().clear();
                self.handle().replace(Session::anonymous_with_error(e.user_message()));
                return Err(e);
            }
        };

        self.begin();
        let credentials = self.client.credentials();
        credentials.save_tokens(&tokens);
        let me_path = self.client.config().api.me_path.clone();
        match self.client.call::<User>(ApiRequest::get(me_path)).await {
            Ok(user) => {
                credentials.save_session(&tokens, &user);
                self.handle().replace(Session::authenticated(user.clone()));
                tracing::info!("Social login completed for {}", user.username);
                Ok(user)
            }
            Err(e) => {
                credentials.clear();
                self.handle().replace(Session::anonymous_with_error(e.user_message()));
                Err(e)
            }
        }
    }

    fn begin(&self) -> Session {
        let previous = self.snapshot();
        self.handle().update(|session| {
            session.loading = true;
            session.error = None;
        });
        previous
    }

    fn finish(
        &self,
        previous: Session,
        result: Result<AuthResponse, ApiError>,
    ) -> Result<User, ApiError> {
        match result {
            Ok(response) => Ok(self.establish(response)),
            Err(e) => {
                // An interceptor teardown already wiped storage; otherwise the
                // state from before the attempt stands.
                let mut session = if e.is_auth() { Session::default() } else { previous };
                session.loading = false;
                session.error = Some(e.user_message());
                self.handle().replace(session);
                Err(e)
            }
        }
    }

    fn establish(&self, response: AuthResponse) -> User {
        self.client
            .credentials()
            .save_session(&response.tokens, &response.user);
        self.handle()
            .replace(Session::authenticated(response.user.clone()));
        tracing::info!("Authenticated as {}", response.user.username);
        response.user
    }
}
