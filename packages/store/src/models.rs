//! # Wire models shared by the stores and the views
//!
//! Plain serde records mirroring the JSON the backend sends and accepts. The
//! backend is not entirely consistent about field naming, so a few fields
//! carry aliases:
//!
//! - [`AuthResponse`] tokens arrive as `access_token`/`refresh_token`, while
//!   OAuth redirects and older builds use `accessToken`/`refreshToken`.
//! - [`Post::created_at`] is sometimes sent as `createAt`.
//! - [`Post::liked`] may be `liked` or `isLiked` depending on the serializer.
//! - [`FollowStatus::followers_count`] is `followerCount` on toggle responses.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A profile: the session's own user or a read-only copy of someone else's. |
//! | [`Post`] / [`Comment`] | Feed entries, rebuilt on every fetch. |
//! | [`LikeStatus`] / [`FollowStatus`] | Authoritative results of a toggle. |
//! | [`AuthResponse`] / [`AuthTokens`] | Credentials handed out by login, register, refresh or OAuth. |
//! | [`Page`] | The paginated envelope around list endpoints. |
//!
//! Request bodies ([`LoginRequest`], [`RegisterRequest`], ...) live here too so
//! tests can assert on exactly what goes over the wire.

use serde::{Deserialize, Serialize};

/// A user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Full name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// A post in the feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub user: User,
    #[serde(default, alias = "createAt")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default, alias = "isLiked")]
    pub liked: bool,
    #[serde(default)]
    pub comment_count: i64,
}

impl Post {
    pub fn like_status(&self) -> LikeStatus {
        LikeStatus {
            is_liked: self.liked,
            like_count: self.like_count,
        }
    }

    /// Overwrite the like fields with a server-confirmed status.
    pub fn apply_like(&mut self, status: LikeStatus) {
        self.liked = status.is_liked;
        self.like_count = status.like_count;
    }
}

/// A comment on a post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub user: User,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of a like toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
    pub like_count: i64,
}

/// Follow relationship between the session user and a profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStatus {
    pub is_following: bool,
    #[serde(default, alias = "followerCount")]
    pub followers_count: i64,
    #[serde(default)]
    pub following_count: i64,
}

/// Token pair handed out by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// Body of a successful login, register or refresh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: AuthTokens,
    pub user: User,
}

/// Spring-style page envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub number: i64,
    #[serde(default = "default_last")]
    pub last: bool,
}

fn default_last() -> bool {
    true
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            last: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCount {
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

/// Login body: the account is identified by email or by username, never both.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    Email { email: String, password: String },
    Username { username: String, password: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostRequest {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: String,
    pub bio: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}
