//! HTTP client with tracing and a fixed API base URL.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing (tokens are never recorded)
//! - Endpoint resolution against a configurable base URL
//! - Convenience methods for the request shapes the API uses

use reqwest::{Client, Response, header};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.bfore.ai";

/// User agent string for bfore.
const USER_AGENT: &str = concat!("bfore/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    base_url: Url,
}

impl HttpClient {
    /// Creates a client for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the TLS backend
    /// cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client for `base_url` with a custom transport timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the TLS backend
    /// cannot be initialised.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            base_url: normalize_base(base_url)?,
        })
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` (e.g. `domain/list`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))
    }

    /// Performs a GET request with an authorization header.
    #[instrument(skip(self, auth_header), fields(url = %url))]
    pub async fn get_with_auth(&self, url: Url, auth_header: &str) -> Result<Response, HttpError> {
        debug!("GET request with auth");

        let response = self
            .inner
            .get(url)
            .header(header::AUTHORIZATION, auth_header)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with JSON body.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<Response, HttpError> {
        debug!("POST request with JSON");

        let response = self.inner.post(url).json(body).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

/// Parses a base URL and makes sure its path ends with `/` so that
/// [`Url::join`] appends instead of replacing the last segment.
fn normalize_base(base_url: &str) -> Result<Url, HttpError> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(HttpError::InvalidUrl(format!("{base_url} cannot be a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_on_bare_host() {
        let client = HttpClient::new("https://api.bfore.ai").unwrap();
        assert_eq!(
            client.endpoint("domain/list").unwrap().as_str(),
            "https://api.bfore.ai/domain/list"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = HttpClient::new("http://localhost:8080/v2").unwrap();
        assert_eq!(
            client.endpoint("/user/login").unwrap().as_str(),
            "http://localhost:8080/v2/user/login"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpClient::new("not-a-valid-url").is_err());
        assert!(HttpClient::new("mailto:someone@example.com").is_err());
    }
}
