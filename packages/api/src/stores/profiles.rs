use store::models::{ProfileUpdate, UploadResult};
use store::{CredentialStore, User};

use super::Cache;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, FilePart, Transport};
use crate::validate;

/// An image picked by the user, already read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Build from a file name, guessing the MIME type from the extension when
    /// the picker did not report one.
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type
            .filter(|t| !t.is_empty())
            .or_else(|| validate::content_type_for(&file_name).map(str::to_string))
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileState {
    pub profile: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Profile reads and edits. Edits to the session's own user are merged into
/// the session by the caller via `SessionStore::set_auth`.
#[derive(Clone)]
pub struct ProfileStore<T, S> {
    client: ApiClient<T, S>,
    state: Cache<ProfileState>,
}

impl<T, S> ProfileStore<T, S>
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

    pub fn snapshot(&self) -> ProfileState {
        self.state.snapshot()
    }

    fn begin(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn settle<R>(
        &self,
        result: Result<R, ApiError>,
        on_ok: impl FnOnce(&mut ProfileState, &R),
    ) -> Result<R, ApiError> {
        self.state.update(|s| {
            s.loading = false;
            match &result {
                Ok(value) => on_ok(s, value),
                Err(e) => s.error = Some(e.user_message()),
            }
        });
        result
    }

    pub async fn fetch_profile(&self, user_id: i64) -> Result<User, ApiError> {
        self.begin();
        let result = self
            .client
            .call::<User>(ApiRequest::get(format!("/api/users/{user_id}")))
            .await;
        self.settle(result, |s, user| s.profile = Some(user.clone()))
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        validate::validate_profile_update(update, &self.client.config().limits)?;
        self.begin();
        let result = self
            .client
            .call::<User>(ApiRequest::put("/api/users/profile").json(update))
            .await;
        self.settle(result, |s, user| s.profile = Some(user.clone()))
    }

    /// Upload a new avatar. Type and size are checked before anything is sent.
    pub async fn upload_profile_image(&self, file: ImageFile) -> Result<UploadResult, ApiError> {
        validate::validate_profile_image(&file, &self.client.config().limits)?;
        self.begin();
        let part = FilePart {
            field: "file".to_string(),
            file_name: file.file_name,
            content_type: file.content_type,
            bytes: file.bytes,
        };
        let result = self
            .client
            .call::<UploadResult>(ApiRequest::post("/api/upload/profile-image").multipart(part))
            .await;
        self.settle(result, |s, upload| {
            if let Some(profile) = s.profile.as_mut() {
                profile.profile_image_url = Some(upload.url.clone());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStore;
    use crate::mock::{auth_json, mock_client, user_json, MockTransport};
    use crate::session::AuthPatch;
    use crate::transport::{Body, Method};
    use serde_json::json;
    use store::MemoryStore;

    fn profiles() -> ProfileStore<MockTransport, MemoryStore> {
        ProfileStore::new(mock_client())
    }

    fn png(len: usize) -> ImageFile {
        ImageFile::new("me.png", None, vec![0u8; len])
    }

    #[tokio::test]
    async fn test_fetch_profile() {
        let store = profiles();
        store.client.transport().respond_json(200, user_json(4, "dana"));

        let user = store.fetch_profile(4).await.unwrap();
        assert_eq!(user.username, "dana");
        assert_eq!(store.snapshot().profile, Some(user));
    }

    #[tokio::test]
    async fn test_oversized_image_sends_nothing() {
        let store = profiles();
        let result = store.upload_profile_image(png(5 * 1024 * 1024 + 1)).await;
        assert_eq!(
            result,
            Err(ApiError::Validation("File size must not exceed 5MB".to_string()))
        );
        assert_eq!(store.client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_non_image_sends_nothing() {
        let store = profiles();
        let file = ImageFile::new("notes.txt", Some("text/plain".to_string()), vec![1, 2, 3]);
        assert!(store.upload_profile_image(file).await.is_err());
        assert_eq!(store.client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let store = profiles();
        let t = store.client.transport();
        t.respond_json(200, user_json(1, "alice"));
        t.respond_json(200, json!({"url": "/uploads/a.png"}));

        store.fetch_profile(1).await.unwrap();
        let upload = store.upload_profile_image(png(16)).await.unwrap();
        assert_eq!(upload.url, "/uploads/a.png");

        let sent = t.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/api/upload/profile-image");
        match sent.body {
            Body::Multipart(part) => {
                assert_eq!(part.field, "file");
                assert_eq!(part.content_type, "image/png");
                assert_eq!(part.bytes.len(), 16);
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
        let profile = store.snapshot().profile.unwrap();
        assert_eq!(profile.profile_image_url.as_deref(), Some("/uploads/a.png"));
    }

    #[tokio::test]
    async fn test_bio_over_limit_sends_nothing() {
        let store = profiles();
        let update = ProfileUpdate {
            full_name: "Alice".to_string(),
            bio: "b".repeat(161),
        };
        assert!(matches!(
            store.update_profile(&update).await,
            Err(ApiError::Validation(_))
        ));
        assert_eq!(store.client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_profile_edit_merges_into_session() {
        let client = mock_client();
        let session = SessionStore::new(client.clone());
        let store = ProfileStore::new(client.clone());
        let t = client.transport();
        t.respond_json(200, auth_json(1, "alice"));
        let mut edited = user_json(1, "alice");
        edited["fullName"] = json!("Alice Liddell");
        edited["bio"] = json!("curiouser");
        t.respond_json(200, edited);

        session.login("alice", "secret").await.unwrap();
        let update = ProfileUpdate {
            full_name: "Alice Liddell".to_string(),
            bio: "curiouser".to_string(),
        };
        let user = store.update_profile(&update).await.unwrap();
        assert_eq!(t.last_request().unwrap().method, Method::Put);

        session.set_auth(AuthPatch::user(user));
        let snapshot = session.snapshot();
        assert!(snapshot.is_authenticated);
        assert_eq!(
            snapshot.user.and_then(|u| u.full_name).as_deref(),
            Some("Alice Liddell")
        );
        let stored = client.credentials().user().unwrap();
        assert_eq!(stored.bio.as_deref(), Some("curiouser"));
    }
}
