//! Raw HTTP requests against the GitHub API
//!
//! [`HttpTransport`] is the minimal capability needed to reach endpoints the
//! typed client does not model: a method, a URL, extra headers and an
//! optional JSON body in, a status code and body text out. Non-2xx statuses
//! are returned as ordinary responses so callers can decide what a 404 means.

use crate::client::{GitHubClient, JSON_MEDIA_TYPE, USER_AGENT};
use crate::error::{GitHubError, Result};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// A request described independently of any HTTP library state
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RawRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first header called `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status code and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into a [`GitHubError::Api`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(GitHubError::from_response(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Something that can perform a [`RawRequest`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: RawRequest) -> Result<RawResponse>;
}

#[async_trait]
impl HttpTransport for GitHubClient {
    async fn send(&self, request: RawRequest) -> Result<RawResponse> {
        debug!(method = %request.method, url = %request.url, "sending GitHub request");

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header("User-Agent", USER_AGENT)
            .header(AUTHORIZATION, self.authorization());

        if request.header(ACCEPT.as_str()).is_none() {
            builder = builder.header(ACCEPT, JSON_MEDIA_TYPE);
        }

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GitHubError::InvalidRequest(e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GitHubError::InvalidRequest(e.to_string()))?;
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(method = %request.method, url = %request.url, status, "received GitHub response");

        Ok(RawResponse { status, body })
    }
}
