//! The catalog API client.
//!
//! This module provides [`ArchivesClient`], which issues one request per
//! call, classifies the response, and returns the body with its keys
//! normalized to snake_case.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::case::normalize_keys;
use crate::clients::http_request::{ArchivesRequest, HttpMethod, SearchParams};
use crate::clients::http_response::RawResponse;
use crate::clients::transport::{masked_headers, ReqwestTransport, Transport, TransportRequest};
use crate::config::{ApiKey, BaseUrl, ClientConfig};
use crate::error::{ArchiError, ErrorKind};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Endpoint used by [`ArchivesClient::search`].
pub const SEARCH_ENDPOINT: &str = "search";

/// Client for the National Archives catalog API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Baseline headers (`Accept`, `Content-Type`, `User-Agent`) merged with
///   per-request headers
/// - The `x-api-key` session header, which requests cannot override
/// - Response classification into [`ArchiError`] kinds
/// - snake_case normalization of response keys
///
/// No request is retried. Every failure is returned to the caller.
///
/// # Thread Safety
///
/// `ArchivesClient` is `Send + Sync` when its transport is. Header state is
/// fixed at construction, so concurrent calls cannot leak headers into each
/// other.
///
/// # Example
///
/// ```rust,ignore
/// use archiwrap::{ArchivesClient, SearchParams};
///
/// let client = ArchivesClient::new("my-api-key")?;
/// let results = client.search(SearchParams::new().q("World War II")).await?;
///
/// println!("{}", results["body"]["hits"]["total"]["value"]);
/// ```
pub struct ArchivesClient<T = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
    default_headers: HashMap<String, String>,
    session_headers: HashMap<String, String>,
}

impl<T: fmt::Debug> fmt::Debug for ArchivesClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchivesClient")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("default_headers", &self.default_headers)
            .field("session_headers", &masked_headers(&self.session_headers))
            .finish()
    }
}

// Verify ArchivesClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArchivesClient>();
};

impl ArchivesClient<ReqwestTransport> {
    /// Creates a client for the default catalog base URL.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind [`ErrorKind::Configuration`] with
    /// the message "API key is required for v2 API" if `api_key` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use archiwrap::ArchivesClient;
    ///
    /// let client = ArchivesClient::new("my-api-key").unwrap();
    /// assert_eq!(client.base_url().as_ref(), "https://catalog.archives.gov/api/v2");
    ///
    /// assert!(ArchivesClient::new("").is_err());
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self, ArchiError> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    /// Creates a client for a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind [`ErrorKind::Configuration`] if
    /// `api_key` is empty or `base_url` is invalid.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ArchiError> {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new(api_key)?)
            .base_url(BaseUrl::new(base_url)?)
            .build()?;
        Self::from_config(config)
    }

    /// Creates a client from a configuration, using the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind [`ErrorKind::Configuration`] if the
    /// HTTP transport cannot be initialized.
    pub fn from_config(config: ClientConfig) -> Result<Self, ArchiError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ArchivesClient<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());

        let mut session_headers = HashMap::new();
        session_headers.insert(
            API_KEY_HEADER.to_string(),
            config.api_key().as_ref().to_string(),
        );

        Self {
            transport,
            config,
            default_headers,
            session_headers,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.config.base_url()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        self.config.api_key()
    }

    /// Returns the baseline headers that per-request headers are merged over.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session headers sent with every request.
    #[must_use]
    pub const fn session_headers(&self) -> &HashMap<String, String> {
        &self.session_headers
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Searches the catalog.
    ///
    /// Equivalent to a `GET` on the `search` endpoint with `params` as the
    /// query string.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn search(&self, params: SearchParams) -> Result<Value, ArchiError> {
        let request = ArchivesRequest::builder(HttpMethod::Get, SEARCH_ENDPOINT)
            .query(params.into_query())
            .build();
        self.execute(request).await
    }

    /// Sends a request and returns the normalized JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] whose kind is, checked in this order:
    /// - [`ErrorKind::RequestFailed`] if no response was received
    /// - [`ErrorKind::NonJsonResponse`] if the `content-type` is not JSON,
    ///   whatever the status
    /// - [`ErrorKind::InvalidParameter`] for status 400
    /// - [`ErrorKind::HttpStatus`] for any other status of 400 or above
    /// - [`ErrorKind::InvalidJsonResponse`] if the body does not parse
    pub async fn execute(&self, request: ArchivesRequest) -> Result<Value, ArchiError> {
        let url = self.config.base_url().join(&request.endpoint);
        let headers = self.merge_headers(&request.extra_headers);

        let transport_request = TransportRequest {
            method: request.method,
            query: request.query_pairs(),
            url: url.clone(),
            headers,
            body: request.body,
        };

        tracing::debug!(method = %request.method, url = %url, "Sending catalog API request");

        let response = self
            .transport
            .send(transport_request)
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Catalog API request failed");
                ArchiError::from(e)
            })?;

        let body = parse_response(&response, &url).map_err(|e| {
            tracing::warn!(url = %url, status = response.status(), error = %e, "Rejected catalog API response");
            e
        })?;

        tracing::debug!(url = %url, status = response.status(), "Catalog API request succeeded");
        Ok(normalize_keys(body))
    }

    // Copies the baseline, lets request headers win on case-insensitive
    // collisions, then applies the session headers last.
    fn merge_headers(&self, extra: &HashMap<String, String>) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();

        for (key, value) in extra {
            if self
                .session_headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(key))
            {
                tracing::warn!(header = %key, "Ignoring request header that overrides a session header");
                continue;
            }
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
            headers.insert(key.clone(), value.clone());
        }

        for (key, value) in &self.session_headers {
            headers.insert(key.clone(), value.clone());
        }

        headers
    }
}

/// Classifies a raw response and parses its body.
///
/// Checks run in a fixed order: content type, then status 400, then any
/// other error status, then JSON parsing. Keys are not normalized here.
///
/// # Errors
///
/// Returns an [`ArchiError`] of kind [`ErrorKind::NonJsonResponse`],
/// [`ErrorKind::InvalidParameter`], [`ErrorKind::HttpStatus`] or
/// [`ErrorKind::InvalidJsonResponse`].
pub fn parse_response(response: &RawResponse, url: &str) -> Result<Value, ArchiError> {
    let content_type = response.content_type();
    let status = response.status();

    if !response.is_json() {
        return Err(
            ArchiError::new(ErrorKind::NonJsonResponse, "API returned non-JSON response")
                .with_diagnostic("content_type", content_type)
                .with_diagnostic("status_code", status)
                .with_diagnostic("url", url),
        );
    }

    if status == 400 {
        return Err(ArchiError::new(ErrorKind::InvalidParameter, "Invalid parameter")
            .with_diagnostic("status_code", 400));
    }

    if response.is_error() {
        // The message names the URL that was actually served, query included
        let served_url = response.url().unwrap_or(url);
        return Err(ArchiError::new(ErrorKind::HttpStatus, status_message(status, served_url))
            .with_diagnostic("status_code", status)
            .with_diagnostic("url", url));
    }

    response.json().map_err(|e| {
        ArchiError::new(ErrorKind::InvalidJsonResponse, "Invalid JSON response")
            .with_diagnostic("content_type", content_type)
            .with_diagnostic("status_code", status)
            .with_diagnostic("error", e.to_string())
            .with_diagnostic("url", url)
    })
}

fn status_message(status: u16, url: &str) -> String {
    let class = if status < 500 { "Client" } else { "Server" };
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    format!("Request failed: {status} {class} Error: {reason} for url: {url}")
}
