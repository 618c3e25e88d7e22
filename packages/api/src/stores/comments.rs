use std::collections::HashMap;

use store::models::CommentRequest;
use store::{Comment, CredentialStore, Page};

use super::Cache;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};
use crate::validate;

/// Comments of one post as last fetched, with the server's total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentThread {
    pub comments: Vec<Comment>,
    pub total: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentState {
    pub threads: HashMap<i64, CommentThread>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct CommentStore<T, S> {
    client: ApiClient<T, S>,
    state: Cache<CommentState>,
}

impl<T, S> CommentStore<T, S>
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

    pub fn snapshot(&self) -> CommentState {
        self.state.snapshot()
    }

    pub fn thread(&self, post_id: i64) -> Option<CommentThread> {
        self.state.update(|s| s.threads.get(&post_id).cloned())
    }

    pub async fn fetch_comments(&self, post_id: i64) -> Result<CommentThread, ApiError> {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let request = ApiRequest::get(format!("/api/posts/{post_id}/comments"))
            .query("page", 0)
            .query("size", self.client.config().feed.page_size);
        let result = self.client.call::<Page<Comment>>(request).await;
        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(page) => {
                    let total = page.total_elements.max(page.content.len() as i64);
                    let thread = CommentThread {
                        comments: page.content,
                        total,
                    };
                    s.threads.insert(post_id, thread.clone());
                    Ok(thread)
                }
                Err(e) => {
                    s.error = Some(e.user_message());
                    Err(e)
                }
            }
        })
    }

    /// Post a comment, then re-read the thread so the displayed count is the
    /// server's, not a local increment.
    pub async fn create_comment(&self, post_id: i64, content: &str) -> Result<Comment, ApiError> {
        let content = validate::validate_comment_content(content, &self.client.config().limits)?;
        let request =
            ApiRequest::post(format!("/api/posts/{post_id}/comments")).json(&CommentRequest { content });
        let comment = match self.client.call::<Comment>(request).await {
            Ok(comment) => comment,
            Err(e) => {
                self.state.update(|s| s.error = Some(e.user_message()));
                return Err(e);
            }
        };
        if let Err(e) = self.fetch_comments(post_id).await {
            tracing::warn!("Comment {} saved but thread reload failed: {}", comment.id, e);
        }
        Ok(comment)
    }
}
