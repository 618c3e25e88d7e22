//! # API client: bearer attachment and the unauthorized policy
//!
//! One [`ApiClient`] is built at startup and cloned into every store. Each
//! clone shares the same transport, credential store, [`SessionHandle`] and
//! [`ClientConfig`].
//!
//! ## Request path
//!
//! 1. The current access token is read from the credential store (the store,
//!    not the in-memory session, is the source of truth) and attached as a
//!    bearer credential.
//! 2. The [`Transport`] exchanges the request.
//! 3. `401`/`403` responses force a logout: the credential trio is cleared and
//!    the session reset to anonymous before [`ApiError::Auth`] is returned.
//!    There is no refresh-and-retry; see
//!    [`SessionStore::refresh`](crate::SessionStore::refresh) for the
//!    explicit exchange.
//! 4. Other non-2xx statuses are classified by [`ApiError::from_status`];
//!    2xx bodies are decoded as JSON, an empty body decoding as `null`.
//!
//! No request is ever retried.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use store::{ClientConfig, CredentialStore};

use crate::error::ApiError;
use crate::session::{Session, SessionHandle};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Message shown on the login screen after a forced logout.
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

#[derive(Clone)]
pub struct ApiClient<T, S> {
    transport: T,
    credentials: S,
    session: SessionHandle,
    config: Rc<ClientConfig>,
}

impl<T, S> ApiClient<T, S>
where
    T: Transport,
    S: CredentialStore,
{
    pub fn new(transport: T, credentials: S, config: ClientConfig) -> Self {
        Self {
            transport,
            credentials,
            session: SessionHandle::new(),
            config: Rc::new(config),
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn credentials(&self) -> &S {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Clear every stored credential and drop back to anonymous.
    pub fn force_logout(&self, message: &str) {
        tracing::warn!("Forcing logout: {}", message);
        self.credentials.clear();
        self.session.replace(Session::anonymous_with_error(message));
    }

    /// Send a request through the interceptor and return the raw response.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if request.bearer.is_none() {
            request.bearer = self.credentials.access_token();
        }
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!("{:?} {}", method, path);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{:?} {} failed: {}", method, path, e);
                return Err(e);
            }
        };

        if response.is_success() {
            return Ok(response);
        }

        let error = ApiError::from_status(response.status, &response.body);
        tracing::warn!("{:?} {} -> {}: {}", method, path, response.status, error);
        if error.is_auth() {
            self.force_logout(SESSION_EXPIRED);
        }
        Err(error)
    }

    /// Send a request and decode the JSON body.
    pub async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        decode(&response.body)
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, ApiError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{sample_user, MockTransport};
    use serde_json::json;
    use store::credentials::SESSION_KEYS;
    use store::{AuthTokens, MemoryStore};

    fn client() -> ApiClient<MockTransport, MemoryStore> {
        ApiClient::new(MockTransport::new(), MemoryStore::new(), ClientConfig::default())
    }

    fn log_in(client: &ApiClient<MockTransport, MemoryStore>) {
        let user = sample_user(1, "alice");
        client.credentials().save_session(
            &AuthTokens {
                access_token: "token-1".to_string(),
                refresh_token: Some("refresh-1".to_string()),
            },
            &user,
        );
        client.session().replace(Session::authenticated(user));
    }

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let client = client();
        log_in(&client);
        client.transport().respond_json(200, json!({"count": 3}));

        let count: store::models::PostCount =
            client.call(ApiRequest::get("/api/posts/user/1/count")).await.unwrap();
        assert_eq!(count.count, 3);

        let sent = client.transport().requests();
        assert_eq!(sent[0].bearer.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_bearer() {
        let client = client();
        client.transport().respond_json(200, json!([]));
        let _: Vec<serde_json::Value> = client.call(ApiRequest::get("/api/posts")).await.unwrap();
        assert!(client.transport().requests()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_forces_logout() {
        let client = client();
        log_in(&client);
        client.transport().respond_empty(401);

        let result: Result<serde_json::Value, _> = client.call(ApiRequest::get("/api/posts")).await;
        assert!(matches!(result, Err(ApiError::Auth { status: 401, .. })));

        let session = client.session().snapshot();
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
        assert_eq!(session.error.as_deref(), Some(SESSION_EXPIRED));
        for key in SESSION_KEYS {
            assert!(client.credentials().get(key).is_none());
        }
        // exactly one request, never retried
        assert_eq!(client.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_server_error_keeps_session() {
        let client = client();
        log_in(&client);
        client
            .transport()
            .respond_json(500, json!({"message": "database down"}));

        let result: Result<serde_json::Value, _> = client.call(ApiRequest::get("/api/posts")).await;
        assert_eq!(
            result,
            Err(ApiError::Server {
                status: 500,
                message: "database down".to_string()
            })
        );
        assert!(client.session().is_authenticated());
        assert!(client.credentials().access_token().is_some());
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let client = client();
        client.transport().respond_empty(204);
        let result: Result<(), _> = client.call(ApiRequest::delete("/api/posts/4")).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_network_failure_surfaces() {
        let client = client();
        client.transport().fail_network();
        let result: Result<(), _> = client.call(ApiRequest::get("/api/posts")).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
