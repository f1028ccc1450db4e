//! The transport seam between the client and an HTTP stack.
//!
//! [`Transport`] is the only capability the client needs from an HTTP
//! library: send one fully-built request and hand back a [`RawResponse`].
//! [`ReqwestTransport`] is the default implementation.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::clients::http_client::API_KEY_HEADER;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::RawResponse;
use crate::error::ConfigError;

/// A fully resolved request, ready to be sent by a [`Transport`].
///
/// The `Debug` output masks the `x-api-key` header value.
#[derive(Clone, PartialEq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, without query string.
    pub url: String,
    /// Encoded query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Final request headers, including session headers.
    pub headers: HashMap<String, String>,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("headers", &masked_headers(&self.headers))
            .field("body", &self.body)
            .finish()
    }
}

/// Returns a view of `headers` with the API key value replaced by `*****`.
pub(crate) fn masked_headers(headers: &HashMap<String, String>) -> HashMap<&str, &str> {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case(API_KEY_HEADER) {
                (name.as_str(), "*****")
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

/// Sends HTTP requests on behalf of an
/// [`ArchivesClient`](crate::ArchivesClient).
///
/// Implementations must return `Err` only when no response was obtained.
/// Any response, whatever its status or content type, is returned as `Ok`
/// so the client can classify it.
///
/// # Example
///
/// ```rust
/// use archiwrap::clients::{RawResponse, Transport, TransportError, TransportRequest};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn send(&self, _request: TransportRequest) -> Result<RawResponse, TransportError> {
///         Ok(RawResponse::with_content_type(200, "application/json", "{}"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends a single request.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with an optional whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the underlying client cannot
    /// be created (e.g., TLS backend initialization failure).
    pub fn new(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ConfigError::TransportInit {
            reason: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Wraps an already configured reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(Self::method(request.method), &request.url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let res = req_builder.send().await?;

        let status = res.status().as_u16();
        let url = res.url().to_string();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(RawResponse::new(status, headers, body).with_url(url))
    }
}
