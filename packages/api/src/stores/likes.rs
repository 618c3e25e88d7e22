use std::collections::HashMap;

use store::{CredentialStore, LikeStatus};

use super::{Cache, ServerValue};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// Server-confirmed like status per post id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LikeState {
    pub likes: HashMap<i64, LikeStatus>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Like pair shown on a post card: the fetched post's pair, or the latest
/// toggle response made against that same fetch.
pub type LikeDisplay = ServerValue<LikeStatus>;

#[derive(Clone)]
pub struct LikeStore<T, S> {
    client: ApiClient<T, S>,
    state: Cache<LikeState>,
}

impl<T, S> LikeStore<T, S>
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

    pub fn snapshot(&self) -> LikeState {
        self.state.snapshot()
    }

    pub fn status(&self, post_id: i64) -> Option<LikeStatus> {
        self.state.update(|s| s.likes.get(&post_id).copied())
    }

    /// Toggle and take the server's `{isLiked, likeCount}` verbatim.
    ///
    /// Failures are logged only; the cached status stays as it was.
    pub async fn toggle_like(&self, post_id: i64) -> Result<LikeStatus, ApiError> {
        self.state.update(|s| s.loading = true);
        let request = ApiRequest::post(format!("/api/posts/{post_id}/like"));
        let result = self.client.call::<LikeStatus>(request).await;
        self.state.update(|s| {
            s.loading = false;
            if let Ok(status) = &result {
                s.likes.insert(post_id, *status);
            }
        });
        if let Err(e) = &result {
            tracing::warn!("Like toggle on post {} failed: {}", post_id, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{mock_client, page_json, post_json, MockTransport};
    use crate::stores::PostStore;
    use serde_json::json;
    use store::MemoryStore;

    fn likes() -> LikeStore<MockTransport, MemoryStore> {
        LikeStore::new(mock_client())
    }

    #[tokio::test]
    async fn test_toggle_takes_server_pair() {
        let store = likes();
        store
            .client
            .transport()
            .respond_json(200, json!({"isLiked": true, "likeCount": 42}));

        let status = store.toggle_like(7).await.unwrap();
        assert_eq!(status, LikeStatus { is_liked: true, like_count: 42 });
        assert_eq!(store.status(7), Some(status));
        assert_eq!(store.client.transport().last_request().unwrap().path, "/api/posts/7/like");
    }

    #[tokio::test]
    async fn test_last_response_wins() {
        let store = likes();
        let t = store.client.transport();
        t.respond_json(200, json!({"isLiked": true, "likeCount": 5}));
        t.respond_json(200, json!({"isLiked": false, "likeCount": 9}));

        store.toggle_like(1).await.unwrap();
        store.toggle_like(1).await.unwrap();

        // 9 came from the server; a local decrement would have produced 4
        assert_eq!(store.status(1), Some(LikeStatus { is_liked: false, like_count: 9 }));
    }

    #[tokio::test]
    async fn test_overlapping_toggles_resolve_to_last_arrival() {
        let store = likes();
        let t = store.client.transport();
        t.respond_json(200, json!({"isLiked": true, "likeCount": 2}));
        t.delay_last(10);
        t.respond_json(200, json!({"isLiked": false, "likeCount": 7}));

        // the first request is answered after the second one
        let (first, second) = tokio::join!(store.toggle_like(1), store.toggle_like(1));
        assert_eq!(second.unwrap(), LikeStatus { is_liked: false, like_count: 7 });
        let first = first.unwrap();
        assert_eq!(first, LikeStatus { is_liked: true, like_count: 2 });
        assert_eq!(store.status(1), Some(first));
    }

    #[tokio::test]
    async fn test_refetch_replaces_displayed_toggle() {
        let posts = PostStore::new(mock_client());
        let likes = LikeStore::new(posts.client().clone());
        let t = posts.client().transport();
        t.respond_json(200, page_json(vec![post_json(1, "p", 4, false)], true));
        t.respond_json(200, json!({"isLiked": true, "likeCount": 5}));
        t.respond_json(200, page_json(vec![post_json(1, "p", 9, true)], true));

        let fetched = posts.fetch_posts(0).await.unwrap()[0].like_status();
        let mut display = LikeDisplay::new(fetched);
        display.confirm(fetched, likes.toggle_like(1).await.unwrap());
        assert_eq!(display.resolve(fetched), LikeStatus { is_liked: true, like_count: 5 });

        let refetched = posts.fetch_posts(0).await.unwrap()[0].like_status();
        assert_eq!(display.resolve(refetched), LikeStatus { is_liked: true, like_count: 9 });
    }

    #[tokio::test]
    async fn test_repeated_identical_response_is_idempotent() {
        let posts = PostStore::new(mock_client());
        posts
            .client()
            .transport()
            .respond_json(200, page_json(vec![post_json(1, "p", 0, false)], true));
        posts.fetch_posts(0).await.unwrap();

        let status = LikeStatus { is_liked: true, like_count: 1 };
        posts.apply_like(1, status);
        let once = posts.snapshot();
        posts.apply_like(1, status);
        assert_eq!(posts.snapshot(), once);
    }

    #[tokio::test]
    async fn test_failure_leaves_state_unchanged() {
        let store = likes();
        let t = store.client.transport();
        t.respond_json(200, json!({"isLiked": true, "likeCount": 1}));
        t.respond_json(500, json!({"message": "nope"}));

        store.toggle_like(3).await.unwrap();
        assert!(store.toggle_like(3).await.is_err());

        let state = store.snapshot();
        assert_eq!(state.likes.get(&3), Some(&LikeStatus { is_liked: true, like_count: 1 }));
        assert!(state.error.is_none());
        assert!(!state.loading);
    }
}
