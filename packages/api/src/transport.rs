//! # Transport: the HTTP seam under [`crate::ApiClient`]
//!
//! [`ApiClient`](crate::ApiClient) never talks to `reqwest` directly. It builds
//! an [`ApiRequest`] (method, path, query, optional bearer token, body) and hands
//! it to a [`Transport`], which returns the raw status and body bytes. Status
//! interpretation (401 teardown, error classification, decoding) stays in the
//! client so every transport behaves the same.
//!
//! - [`HttpTransport`]: production implementation over `reqwest`, usable both
//!   natively and in the browser.
//! - `MockTransport` (tests only): scripted responses plus a request log, so
//!   tests can assert that validation failures issue no request at all.
//!
//! Only failures to exchange a request at all map to [`ApiError::Network`].

use std::future::Future;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A file sent as `multipart/form-data`.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(FilePart),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body. Serialization of our own request types cannot fail;
    /// if it ever does the body degrades to `null` and the server rejects it.
    pub fn json<B: serde::Serialize>(mut self, body: &B) -> Self {
        self.body = Body::Json(serde_json::to_value(body).unwrap_or(serde_json::Value::Null));
        self
    }

    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = Body::Multipart(part);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async request/response exchange with the backend.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// `reqwest`-backed transport rooted at the backend origin.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, request: ApiRequest) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| ApiError::validation(format!("Invalid file type: {e}")))?;
                builder.multipart(reqwest::multipart::Form::new().part(file.field, part))
            }
        };
        Ok(builder)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("/api/posts").query("page", 2).query("size", 10);
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
        assert_eq!(request.body, Body::Empty);
    }

    #[test]
    fn test_http_transport_trims_base() {
        let transport = HttpTransport::new("http://localhost:8080/");
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }
}
