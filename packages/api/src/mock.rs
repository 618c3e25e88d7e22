//! Scripted transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;
use store::{ClientConfig, MemoryStore, User};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

struct Scripted {
    response: Result<ApiResponse, ApiError>,
    delay: usize,
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<Scripted>,
    requests: Vec<ApiRequest>,
}

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        let body = serde_json::to_vec(&body).unwrap();
        self.push(Ok(ApiResponse { status, body }))
    }

    pub fn respond_empty(&self, status: u16) -> &Self {
        self.push(Ok(ApiResponse {
            status,
            body: Vec::new(),
        }))
    }

    pub fn fail_network(&self) -> &Self {
        self.push(Err(ApiError::Network("connection refused".to_string())))
    }

    fn push(&self, response: Result<ApiResponse, ApiError>) -> &Self {
        self.state
            .borrow_mut()
            .responses
            .push_back(Scripted { response, delay: 0 });
        self
    }

    /// Hold the most recently queued response back for `polls` scheduler
    /// turns, so requests sent after it can be answered first.
    pub fn delay_last(&self, polls: usize) -> &Self {
        if let Some(scripted) = self.state.borrow_mut().responses.back_mut() {
            scripted.delay = polls;
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.borrow().requests.last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let scripted = {
            let mut state = self.state.borrow_mut();
            state.requests.push(request);
            state.responses.pop_front()
        };
        let Some(Scripted { response, delay }) = scripted else {
            return Err(ApiError::Network("no scripted response".to_string()));
        };
        for _ in 0..delay {
            tokio::task::yield_now().await;
        }
        response
    }
}

pub type MockClient = ApiClient<MockTransport, MemoryStore>;

pub fn mock_client() -> MockClient {
    ApiClient::new(MockTransport::new(), MemoryStore::new(), ClientConfig::default())
}

pub fn sample_user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        full_name: Some(format!("{username} full")),
        bio: None,
        profile_image_url: None,
        email: format!("{username}@example.com"),
    }
}

pub fn user_json(id: i64, username: &str) -> Value {
    serde_json::to_value(sample_user(id, username)).unwrap()
}

pub fn auth_json(id: i64, username: &str) -> Value {
    serde_json::json!({
        "access_token": format!("access-{id}"),
        "refresh_token": format!("refresh-{id}"),
        "user": user_json(id, username),
    })
}

pub fn post_json(id: i64, content: &str, like_count: i64, liked: bool) -> Value {
    serde_json::json!({
        "id": id,
        "content": content,
        "user": user_json(1, "alice"),
        "createdAt": "2024-05-01T10:00:00",
        "likeCount": like_count,
        "liked": liked,
        "commentCount": 0,
    })
}

pub fn page_json(content: Vec<Value>, last: bool) -> Value {
    let total = content.len();
    serde_json::json!({
        "content": content,
        "totalElements": total,
        "totalPages": 1,
        "number": 0,
        "last": last,
    })
}
