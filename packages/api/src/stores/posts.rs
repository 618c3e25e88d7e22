use store::models::{PostCount, PostRequest};
use store::{CredentialStore, LikeStatus, Page, Post};

use super::Cache;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};
use crate::validate;

/// Last-fetched feed and profile posts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostState {
    pub posts: Vec<Post>,
    pub user_posts: Vec<Post>,
    pub user_post_count: Option<i64>,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct PostStore<T, S> {
    client: ApiClient<T, S>,
    state: Cache<PostState>,
}

impl<T, S> PostStore<T, S>
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

    pub fn client(&self) -> &ApiClient<T, S> {
        &self.client
    }

    pub fn snapshot(&self) -> PostState {
        self.state.snapshot()
    }

    fn begin(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail<R>(&self, e: ApiError) -> Result<R, ApiError> {
        self.state.update(|s| {
            s.loading = false;
            s.error = Some(e.user_message());
        });
        Err(e)
    }

    fn page_request(&self, path: String, page: u32) -> ApiRequest {
        ApiRequest::get(path)
            .query("page", page)
            .query("size", self.client.config().feed.page_size)
    }

    /// Home feed, newest first.
    pub async fn fetch_posts(&self, page: u32) -> Result<Vec<Post>, ApiError> {
        self.begin();
        let request = self.page_request("/api/posts".to_string(), page);
        match self.client.call::<Page<Post>>(request).await {
            Ok(page) => Ok(self.state.update(|s| {
                s.posts = page.content;
                s.has_more = !page.last;
                s.loading = false;
                s.posts.clone()
            })),
            Err(e) => self.fail(e),
        }
    }

    pub async fn fetch_user_posts(&self, user_id: i64, page: u32) -> Result<Vec<Post>, ApiError> {
        self.begin();
        let request = self.page_request(format!("/api/posts/user/{user_id}"), page);
        match self.client.call::<Page<Post>>(request).await {
            Ok(page) => Ok(self.state.update(|s| {
                s.user_posts = page.content;
                s.loading = false;
                s.user_posts.clone()
            })),
            Err(e) => self.fail(e),
        }
    }

    pub async fn fetch_user_post_count(&self, user_id: i64) -> Result<i64, ApiError> {
        let request = ApiRequest::get(format!("/api/posts/user/{user_id}/count"));
        match self.client.call::<PostCount>(request).await {
            Ok(PostCount { count }) => {
                self.state.update(|s| s.user_post_count = Some(count));
                Ok(count)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn create_post(&self, content: &str) -> Result<Post, ApiError> {
        let content = validate::validate_post_content(content, &self.client.config().limits)?;
        self.begin();
        let request = ApiRequest::post("/api/posts").json(&PostRequest { content });
        match self.client.call::<Post>(request).await {
            Ok(post) => {
                self.state.update(|s| {
                    s.posts.insert(0, post.clone());
                    s.loading = false;
                });
                Ok(post)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn update_post(&self, post_id: i64, content: &str) -> Result<Post, ApiError> {
        let content = validate::validate_post_content(content, &self.client.config().limits)?;
        self.begin();
        let request = ApiRequest::put(format!("/api/posts/{post_id}")).json(&PostRequest { content });
        match self.client.call::<Post>(request).await {
            Ok(post) => {
                self.state.update(|s| {
                    for cached in s.posts.iter_mut().chain(s.user_posts.iter_mut()) {
                        if cached.id == post.id {
                            *cached = post.clone();
                        }
                    }
                    s.loading = false;
                });
                Ok(post)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<(), ApiError> {
        self.begin();
        match self
            .client
            .call::<()>(ApiRequest::delete(format!("/api/posts/{post_id}")))
            .await
        {
            Ok(()) => {
                self.state.update(|s| {
                    s.posts.retain(|p| p.id != post_id);
                    s.user_posts.retain(|p| p.id != post_id);
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Copy a server-confirmed like status into the cached posts.
    pub fn apply_like(&self, post_id: i64, status: LikeStatus) {
        self.state.update(|s| {
            for post in s.posts.iter_mut().chain(s.user_posts.iter_mut()) {
                if post.id == post_id {
                    post.apply_like(status);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{mock_client, page_json, post_json, MockTransport};
    use crate::transport::{Body, Method};
    use serde_json::json;
    use store::MemoryStore;

    fn posts() -> PostStore<MockTransport, MemoryStore> {
        PostStore::new(mock_client())
    }

    #[tokio::test]
    async fn test_fetch_replaces_cache() {
        let store = posts();
        let t = store.client.transport();
        t.respond_json(200, page_json(vec![post_json(1, "one", 0, false), post_json(2, "two", 0, false)], false));
        t.respond_json(200, page_json(vec![post_json(3, "three", 0, false)], true));

        store.fetch_posts(0).await.unwrap();
        assert_eq!(store.snapshot().posts.len(), 2);
        assert!(store.snapshot().has_more);

        store.fetch_posts(1).await.unwrap();
        let state = store.snapshot();
        assert_eq!(state.posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
        assert!(!state.has_more);
        assert!(!state.loading);

        let sent = t.last_request().unwrap();
        assert_eq!(sent.path, "/api/posts");
        assert!(sent.query.contains(&("page".to_string(), "1".to_string())));
        assert!(sent.query.contains(&("size".to_string(), "10".to_string())));
    }

    #[tokio::test]
    async fn test_create_post_over_limit_sends_nothing() {
        let store = posts();
        let result = store.create_post(&"x".repeat(281)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(store.client.transport().request_count(), 0);
        assert!(store.snapshot().posts.is_empty());
    }

    #[tokio::test]
    async fn test_create_post_trims_and_prepends() {
        let store = posts();
        let t = store.client.transport();
        t.respond_json(200, page_json(vec![post_json(1, "old", 0, false)], true));
        t.respond_json(200, post_json(2, "fresh", 0, false));

        store.fetch_posts(0).await.unwrap();
        store.create_post("  fresh  ").await.unwrap();

        assert_eq!(t.last_request().unwrap().body, Body::Json(json!({"content": "fresh"})));
        let ids: Vec<i64> = store.snapshot().posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = posts();
        let t = store.client.transport();
        t.respond_json(200, page_json(vec![post_json(1, "old", 0, false), post_json(2, "keep", 0, false)], true));
        t.respond_json(200, post_json(1, "edited", 0, false));
        t.respond_empty(204);

        store.fetch_posts(0).await.unwrap();
        store.update_post(1, "edited").await.unwrap();
        assert_eq!(t.last_request().unwrap().method, Method::Put);
        assert_eq!(store.snapshot().posts[0].content, "edited");

        store.delete_post(1).await.unwrap();
        assert_eq!(t.last_request().unwrap().path, "/api/posts/1");
        let ids: Vec<i64> = store.snapshot().posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_keeps_cache() {
        let store = posts();
        let t = store.client.transport();
        t.respond_json(200, page_json(vec![post_json(1, "one", 0, false)], true));
        t.respond_json(500, json!({"message": "boom"}));

        store.fetch_posts(0).await.unwrap();
        assert!(store.fetch_posts(0).await.is_err());
        let state = store.snapshot();
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_user_posts_and_count() {
        let store = posts();
        let t = store.client.transport();
        t.respond_json(200, page_json(vec![post_json(9, "mine", 0, false)], true));
        t.respond_json(200, json!({"count": 1}));

        store.fetch_user_posts(1, 0).await.unwrap();
        assert_eq!(store.fetch_user_post_count(1).await.unwrap(), 1);
        let state = store.snapshot();
        assert_eq!(state.user_posts.len(), 1);
        assert_eq!(state.user_post_count, Some(1));
        assert!(state.posts.is_empty());
    }

    #[tokio::test]
    async fn test_apply_like_sets_exact_values() {
        let store = posts();
        store
            .client
            .transport()
            .respond_json(200, page_json(vec![post_json(1, "one", 10, false)], true));
        store.fetch_posts(0).await.unwrap();

        store.apply_like(1, LikeStatus { is_liked: true, like_count: 3 });
        let post = &store.snapshot().posts[0];
        assert!(post.liked);
        assert_eq!(post.like_count, 3);
    }
}
