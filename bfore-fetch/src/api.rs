//! BforeAI API endpoints.
//!
//! [`ApiClient`] knows the three endpoints the CLI uses:
//!
//! | endpoint | method | auth |
//! |---|---|---|
//! | `user/login` | POST JSON `{username, password}` | none |
//! | `report/list` | GET | bearer |
//! | `domain/list` | GET | bearer |
//!
//! Every call makes exactly one request. Non-200 answers are errors; the
//! caller decides what an error means (the windowed pipeline, for example,
//! turns it into a failed window).

use async_trait::async_trait;
use bfore_core::{DomainReport, ScoredDomain, Session, TimeWindow, format_timestamp};
use reqwest::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{FetchError, HttpError};
use crate::http::HttpClient;
use crate::worker::{SampleQuery, WindowFetcher};

/// Maximum number of body bytes kept in [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 512;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: String,
    #[serde(default)]
    username: String,
}

/// Query of the report list endpoint.
///
/// The include flags are sent exactly as given; the API interprets them.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    /// Domain to report on.
    pub domain: String,
    /// Include certificate details.
    pub certificate: String,
    /// Include whois.
    pub whois: String,
    /// Include DNS.
    pub dns: String,
    /// Include a screenshot.
    pub screenshot: String,
    /// Start of the report range (ISO-8601, passed through).
    pub start: String,
    /// End of the report range (ISO-8601, passed through).
    pub end: String,
}

// ============================================================================
// API Client
// ============================================================================

/// Client for the BforeAI API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Creates an API client on top of an HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::AuthenticationFailed`] on a non-200 answer or
    /// when the answer carries no token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, FetchError> {
        let url = self.http.endpoint("user/login")?;
        let body = LoginRequest {
            username: username.trim(),
            password: password.trim(),
        };

        let response = self.http.post_json(url, &body).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(HttpError::from)?;

        if status != reqwest::StatusCode::OK {
            return Err(FetchError::AuthenticationFailed(format!(
                "status {status}: {}",
                truncate_body(&bytes)
            )));
        }

        let parsed: LoginResponse = serde_json::from_slice(&bytes)?;
        if parsed.token.trim().is_empty() {
            return Err(FetchError::AuthenticationFailed(
                "login succeeded but no token was provided".to_string(),
            ));
        }

        info!(username = %parsed.username, "Authenticated");
        Ok(Session::new(parsed.token, parsed.username))
    }

    /// Builds the report list URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid.
    pub fn report_list_url(&self, query: &ReportQuery) -> Result<Url, FetchError> {
        let mut url = self.http.endpoint("report/list")?;
        url.query_pairs_mut()
            .append_pair("d", &query.domain)
            .append_pair("c", &query.certificate)
            .append_pair("w", &query.whois)
            .append_pair("n", &query.dns)
            .append_pair("s", &query.screenshot)
            .append_pair("st", &query.start)
            .append_pair("en", &query.end);
        Ok(url)
    }

    /// Fetches reports for a single domain.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotAuthenticated`] without making a request if
    /// the session is empty; otherwise transport, status and decode errors.
    pub async fn report_list(
        &self,
        session: &Session,
        query: &ReportQuery,
    ) -> Result<DomainReport, FetchError> {
        let bearer = session.bearer().ok_or(FetchError::NotAuthenticated)?;
        let url = self.report_list_url(query)?;

        let response = self.http.get_with_auth(url, &bearer).await?;
        let bytes = ok_body(response).await?;
        let report: DomainReport = serde_json::from_slice(&bytes)?;

        debug!(reports = report.reports.len(), "Decoded report list");
        Ok(report)
    }

    /// Builds the domain list URL for one window.
    ///
    /// Parameter order is fixed: `c`, `d`, `s`, `e`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid.
    pub fn domain_list_url(
        &self,
        window: &TimeWindow,
        query: &SampleQuery,
    ) -> Result<Url, FetchError> {
        let mut url = self.http.endpoint("domain/list")?;
        url.query_pairs_mut()
            .append_pair("c", &query.count.to_string())
            .append_pair("d", &query.min_score.to_string())
            .append_pair("s", &format_timestamp(&window.start()))
            .append_pair("e", &format_timestamp(&window.end()));
        Ok(url)
    }

    /// Fetches the scored domains of one window.
    ///
    /// The endpoint answers with a flat JSON array; an empty array is a
    /// valid, empty result.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotAuthenticated`] without making a request if
    /// the session is empty; otherwise transport, status and decode errors.
    pub async fn domain_list(
        &self,
        window: &TimeWindow,
        session: &Session,
        query: &SampleQuery,
    ) -> Result<Vec<ScoredDomain>, FetchError> {
        let bearer = session.bearer().ok_or(FetchError::NotAuthenticated)?;
        let url = self.domain_list_url(window, query)?;

        let response = self.http.get_with_auth(url, &bearer).await?;
        let bytes = ok_body(response).await?;
        let domains: Vec<ScoredDomain> = serde_json::from_slice(&bytes)?;

        debug!(window = %window, count = domains.len(), "Decoded domain list");
        Ok(domains)
    }
}

#[async_trait]
impl WindowFetcher for ApiClient {
    fn id(&self) -> &str {
        "bforeai.domain_list"
    }

    async fn fetch(
        &self,
        window: &TimeWindow,
        session: &Session,
        query: &SampleQuery,
    ) -> Result<Vec<ScoredDomain>, FetchError> {
        self.domain_list(window, session, query).await
    }
}

/// Reads the body of a 200 response, or turns anything else into
/// [`FetchError::Status`].
async fn ok_body(response: Response) -> Result<Vec<u8>, FetchError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(HttpError::from)?;

    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body: truncate_body(&bytes),
        });
    }
    Ok(bytes.to_vec())
}

fn truncate_body(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= MAX_ERROR_BODY {
        return text.into_owned();
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

// ============================================================================
// Tests
// ============================================================================
