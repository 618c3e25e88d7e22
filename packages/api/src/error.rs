//! Error taxonomy for every call the client makes.

use serde::Deserialize;

/// Failure of a client operation.
///
/// Validation errors never reach the network. Auth errors have already torn
/// the session down by the time the caller sees them. Everything else is
/// terminal for the user action and is rendered inline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Auth { status: u16, message: String },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Error body shape used by the backend (`{"message": ...}`), with the
/// framework default (`{"error": ...}`) as fallback.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = server_message(body).unwrap_or_else(|| default_message(status).to_string());
        match status {
            401 | 403 => Self::Auth { status, message },
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Server { status, message },
        }
    }

    /// Whether this error tears the session down.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Text suitable for an inline error label.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Decode(_) => "Something went wrong. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "The request was rejected.",
        401 => "Session expired. Please log in again.",
        403 => "You are not allowed to do that.",
        404 => "Not found.",
        409 => "That already exists.",
        _ => "Server error. Please try again later.",
    }
}
