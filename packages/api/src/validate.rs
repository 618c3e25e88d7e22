//! Client-side checks run before any request is built.
//!
//! Every function here is pure. A failure is an [`ApiError::Validation`] and
//! the caller returns it without touching the transport.

use store::config::LimitsConfig;
use store::models::{LoginRequest, ProfileUpdate, RegisterRequest};

use crate::error::ApiError;
use crate::stores::ImageFile;

/// How a login form identifies the account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginIdentity {
    Email(String),
    Username(String),
}

impl LoginIdentity {
    /// Email when the input looks like one, username otherwise.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if is_email(input) {
            Self::Email(input.to_string())
        } else {
            Self::Username(input.to_string())
        }
    }

    pub fn into_request(self, password: &str) -> LoginRequest {
        let password = password.to_string();
        match self {
            Self::Email(email) => LoginRequest::Email { email, password },
            Self::Username(username) => LoginRequest::Username { username, password },
        }
    }
}

/// `^[^\s@]+@[^\s@]+\.[^\s@]+$`
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_login(identifier: &str, password: &str) -> Result<LoginRequest, ApiError> {
    if identifier.trim().is_empty() {
        return Err(ApiError::validation("Email or username is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(LoginIdentity::parse(identifier).into_request(password))
}

pub fn validate_registration(form: &RegisterRequest) -> Result<(), ApiError> {
    let required = [
        (&form.email, "Email"),
        (&form.full_name, "Full name"),
        (&form.username, "Username"),
        (&form.password, "Password"),
    ];
    for (value, label) in required {
        if value.trim().is_empty() {
            return Err(ApiError::validation(format!("{label} is required")));
        }
    }
    Ok(())
}

fn validate_text(content: &str, limit: usize, what: &str) -> Result<String, ApiError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{what} cannot be empty")));
    }
    if trimmed.chars().count() > limit {
        return Err(ApiError::validation(format!(
            "{what} must not exceed {limit} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Returns the trimmed body to send.
pub fn validate_post_content(content: &str, limits: &LimitsConfig) -> Result<String, ApiError> {
    validate_text(content, limits.max_post_chars, "Post")
}

pub fn validate_comment_content(content: &str, limits: &LimitsConfig) -> Result<String, ApiError> {
    validate_text(content, limits.max_comment_chars, "Comment")
}

pub fn validate_profile_update(update: &ProfileUpdate, limits: &LimitsConfig) -> Result<(), ApiError> {
    if update.full_name.chars().count() > limits.max_full_name_chars {
        return Err(ApiError::validation(format!(
            "Full name must not exceed {} characters",
            limits.max_full_name_chars
        )));
    }
    if update.bio.chars().count() > limits.max_bio_chars {
        return Err(ApiError::validation(format!(
            "Bio must not exceed {} characters",
            limits.max_bio_chars
        )));
    }
    Ok(())
}

pub fn validate_profile_image(file: &ImageFile, limits: &LimitsConfig) -> Result<(), ApiError> {
    if !file.content_type.starts_with("image/") {
        return Err(ApiError::validation("Please select an image file"));
    }
    if file.bytes.is_empty() {
        return Err(ApiError::validation("The selected file is empty"));
    }
    if file.bytes.len() as u64 > limits.max_image_bytes {
        let mib = limits.max_image_bytes / (1024 * 1024);
        return Err(ApiError::validation(format!(
            "File size must not exceed {mib}MB"
        )));
    }
    Ok(())
}

/// Image MIME type from a file name's extension.
pub fn content_type_for(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
