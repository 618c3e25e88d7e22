//! # Social login: authorization redirect and callback parsing
//!
//! Social login is driven entirely by the backend:
//!
//! 1. The browser is sent to `{base}/oauth2/authorization/{provider}`
//!    ([`authorization_url`]). The backend runs the provider's authorization
//!    code flow.
//! 2. On success the backend redirects to the client's `/oauth2/callback`
//!    route with the token pair in the query string:
//!    `?token=<access>&refreshToken=<refresh>`. On failure it appends
//!    `?error=<reason>` instead.
//! 3. [`parse_callback`] pulls the tokens out of that URL. The session store
//!    then looks up the user and writes the full credential trio.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use store::AuthTokens;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Google,
    GitHub,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::GitHub];

    /// Registration id used in the backend's authorization path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::GitHub => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::Google => "Continue with Google",
            Provider::GitHub => "Continue with GitHub",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "github" => Ok(Provider::GitHub),
            other => Err(ApiError::validation(format!("Unknown provider: {other}"))),
        }
    }
}

/// Where to send the browser to start a social login.
pub fn authorization_url(base_url: &str, provider: Provider) -> String {
    format!(
        "{}/oauth2/authorization/{}",
        base_url.trim_end_matches('/'),
        provider.as_str()
    )
}

/// Extract the token pair from the callback URL, or from its bare query
/// string (`token=...&refreshToken=...`).
pub fn parse_callback(callback: &str) -> Result<AuthTokens, ApiError> {
    let url = if callback.contains("://") {
        Url::parse(callback)
    } else {
        let query = callback.trim_start_matches('?');
        Url::parse(&format!("http://localhost/oauth2/callback?{query}"))
    }
    .map_err(|e| ApiError::validation(format!("Malformed callback: {e}")))?;

    let mut access = None;
    let mut refresh = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => {
                return Err(ApiError::Auth {
                    status: 401,
                    message: format!("Social login failed: {value}"),
                })
            }
            "token" | "accessToken" | "access_token" => access = Some(value.into_owned()),
            "refreshToken" | "refresh_token" => refresh = Some(value.into_owned()),
            _ => {}
        }
    }

    let access_token = access
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Auth {
            status: 401,
            message: "Social login did not return a token".to_string(),
        })?;
    Ok(AuthTokens {
        access_token,
        refresh_token: refresh.filter(|t| !t.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url() {
        assert_eq!(
            authorization_url("http://localhost:8080/", Provider::Google),
            "http://localhost:8080/oauth2/authorization/google"
        );
        assert_eq!(
            authorization_url("https://api.flock.dev", Provider::GitHub),
            "https://api.flock.dev/oauth2/authorization/github"
        );
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("GitHub".parse::<Provider>().unwrap(), Provider::GitHub);
        assert!("myspace".parse::<Provider>().is_err());
    }

    #[test]
    fn test_parse_full_callback_url() {
        let tokens =
            parse_callback("http://localhost:5173/oauth2/callback?token=abc&refreshToken=def").unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token.as_deref(), Some("def"));
    }

    #[test]
    fn test_parse_bare_query() {
        let tokens = parse_callback("?token=abc").unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert!(tokens.refresh_token.is_none());
    }

    #[test]
    fn test_callback_error_and_missing_token() {
        assert!(parse_callback("?error=access_denied").unwrap_err().is_auth());
        assert!(parse_callback("?refreshToken=only").unwrap_err().is_auth());
        assert!(parse_callback("?token=").is_err());
    }
}
