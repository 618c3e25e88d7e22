use std::collections::HashMap;

use store::{CredentialStore, FollowStatus};

use super::Cache;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FollowState {
    pub statuses: HashMap<i64, FollowStatus>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct FollowStore<T, S> {
    client: ApiClient<T, S>,
    state: Cache<FollowState>,
}

impl<T, S> FollowStore<T, S>
where
    T: Transport,
    S: CredentialStore,
{
    pub fn new(client: ApiClient<T, S>) -> Self {
        Self {
            client,
            state: Cache::default(),
        }
    }

    pub fn snapshot(&self) -> FollowState {
        self.state.snapshot()
    }

    pub fn status(&self, user_id: i64) -> Option<FollowStatus> {
        self.state.update(|s| s.statuses.get(&user_id).copied())
    }

    pub async fn fetch_status(&self, user_id: i64) -> Result<FollowStatus, ApiError> {
        self.run(user_id, ApiRequest::get(format!("/api/follow/{user_id}/status")))
            .await
    }

    /// Follow or unfollow; counts come back from the server.
    pub async fn toggle_follow(&self, user_id: i64) -> Result<FollowStatus, ApiError> {
        self.run(user_id, ApiRequest::post(format!("/api/follow/{user_id}/toggle")))
            .await
    }

    async fn run(&self, user_id: i64, request: ApiRequest) -> Result<FollowStatus, ApiError> {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let result = self.client.call::<FollowStatus>(request).await;
        self.state.update(|s| {
            s.loading = false;
            match &result {
                Ok(status) => {
                    s.statuses.insert(user_id, *status);
                }
                Err(e) => s.error = Some(e.user_message()),
            }
        });
        result
    }
}
