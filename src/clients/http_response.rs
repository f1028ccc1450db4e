//! Raw response type returned by transports.
//!
//! [`RawResponse`] is the narrow view of an HTTP response the client needs to
//! classify it: the status code, case-insensitive header lookup, and a body
//! that can be parsed as JSON.

use std::collections::HashMap;

/// An HTTP response as received from a [`Transport`](crate::clients::Transport).
///
/// Header names are stored lowercased so lookups are case-insensitive.
///
/// # Example
///
/// ```rust
/// use archiwrap::clients::RawResponse;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("Content-Type".to_string(), vec!["application/json".to_string()]);
///
/// let response = RawResponse::new(200, headers, r#"{"totalRecords": 1}"#);
/// assert_eq!(response.header("content-type"), Some("application/json"));
/// assert!(response.is_json());
/// assert_eq!(response.json().unwrap()["totalRecords"], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, Vec<String>>,
    body: String,
    url: Option<String>,
}

impl RawResponse {
    /// Creates a new response, lowercasing header names.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }

        Self {
            status,
            headers: normalized,
            body: body.into(),
            url: None,
        }
    }

    /// Records the final URL the response was served from, query included.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Convenience constructor for a response with a single `content-type` header.
    #[must_use]
    pub fn with_content_type(status: u16, content_type: &str, body: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), vec![content_type.to_string()]);
        Self::new(status, headers, body)
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns all headers, keyed by lowercased name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `content-type` header, or an empty string when absent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or_default()
    }

    /// Returns `true` if the `content-type` header mentions `application/json`.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().contains("application/json")
    }

    /// Returns `true` if the status code is 400 or above.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Returns the final request URL, if the transport reported one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if the body is not valid JSON,
    /// including when it is empty.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), vec!["abc-123".to_string()]);

        let response = RawResponse::new(200, headers, "");
        assert_eq!(response.header("x-request-id"), Some("abc-123"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("abc-123"));
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.header("missing").is_none());
    }

    #[test]
    fn test_headers_differing_only_in_case_are_combined() {
        let mut headers = HashMap::new();
        headers.insert("Set-Cookie".to_string(), vec!["a=1".to_string()]);
        headers.insert("set-cookie".to_string(), vec!["b=2".to_string()]);

        let response = RawResponse::new(200, headers, "");
        assert_eq!(response.headers()["set-cookie"].len(), 2);
    }

    #[test]
    fn test_content_type_defaults_to_empty() {
        let response = RawResponse::new(200, HashMap::new(), "{}");
        assert_eq!(response.content_type(), "");
        assert!(!response.is_json());
    }

    #[test]
    fn test_is_json_accepts_parameters() {
        let response =
            RawResponse::with_content_type(200, "application/json; charset=utf-8", "{}");
        assert!(response.is_json());

        let response = RawResponse::with_content_type(200, "text/html", "<html></html>");
        assert!(!response.is_json());
    }

    #[test]
    fn test_url_is_optional() {
        let response = RawResponse::with_content_type(200, "application/json", "{}");
        assert_eq!(response.url(), None);

        let response = response.with_url("https://example.com/search?q=x");
        assert_eq!(response.url(), Some("https://example.com/search?q=x"));
    }

    #[test]
    fn test_is_error() {
        assert!(!RawResponse::with_content_type(200, "application/json", "").is_error());
        assert!(!RawResponse::with_content_type(302, "application/json", "").is_error());
        assert!(RawResponse::with_content_type(400, "application/json", "").is_error());
        assert!(RawResponse::with_content_type(503, "application/json", "").is_error());
    }

    #[test]
    fn test_json_parses_body() {
        let response = RawResponse::with_content_type(
            200,
            "application/json",
            r#"{"body": {"hits": {"total": {"value": 3}}}}"#,
        );
        assert_eq!(
            response.json().unwrap(),
            json!({"body": {"hits": {"total": {"value": 3}}}})
        );
    }

    #[test]
    fn test_json_rejects_malformed_and_empty_bodies() {
        let response = RawResponse::with_content_type(200, "application/json", "{not json");
        assert!(response.json().is_err());

        let response = RawResponse::with_content_type(200, "application/json", "");
        assert!(response.json().is_err());
    }
}
