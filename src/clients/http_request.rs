//! Request types for the archives client.
//!
//! This module provides [`ArchivesRequest`] and its builder, the
//! [`SearchParams`] helper used by
//! [`ArchivesClient::search`](crate::ArchivesClient::search), and
//! [`QueryValue`] for query parameters that may be scalars or lists.

use std::collections::HashMap;
use std::fmt;

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP PATCH method.
    Patch,
    /// HTTP DELETE method.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query parameter value.
///
/// Scalars encode as a single `key=value` pair. Lists encode as one pair per
/// element with the key repeated, so `ids=[1, 2]` becomes `ids=1&ids=2`.
///
/// # Example
///
/// ```rust
/// use archiwrap::clients::QueryValue;
///
/// let mut pairs = Vec::new();
/// QueryValue::from(vec![1, 2]).append_pairs("ids", &mut pairs);
/// QueryValue::from(true).append_pairs("exact", &mut pairs);
///
/// assert_eq!(pairs, [
///     ("ids".to_string(), "1".to_string()),
///     ("ids".to_string(), "2".to_string()),
///     ("exact".to_string(), "true".to_string()),
/// ]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A floating point value. Whole numbers keep their fractional part (`1.0`).
    Float(f64),
    /// A boolean value, encoded as `true` or `false`.
    Bool(bool),
    /// A list of values, encoded as repeated keys.
    List(Vec<QueryValue>),
}

impl QueryValue {
    /// Appends the encoded `(key, value)` pairs for this value to `out`.
    pub fn append_pairs(&self, key: &str, out: &mut Vec<(String, String)>) {
        match self {
            Self::Str(s) => out.push((key.to_string(), s.clone())),
            Self::Int(i) => out.push((key.to_string(), i.to_string())),
            Self::Float(f) => out.push((key.to_string(), format!("{f:?}"))),
            Self::Bool(b) => out.push((key.to_string(), b.to_string())),
            Self::List(items) => {
                for item in items {
                    item.append_pairs(key, out);
                }
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// A single request to the catalog API.
///
/// Use [`ArchivesRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use archiwrap::clients::{ArchivesRequest, HttpMethod};
///
/// let request = ArchivesRequest::builder(HttpMethod::Get, "search")
///     .query_param("q", "World War II")
///     .query_param("limit", 20)
///     .header("X-Trace-Id", "abc-123")
///     .build();
///
/// assert_eq!(request.endpoint, "search");
/// assert_eq!(request.query_pairs().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArchivesRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The endpoint, relative to the client's base URL.
    pub endpoint: String,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, QueryValue)>,
    /// Headers merged over the client's baseline headers.
    pub extra_headers: HashMap<String, String>,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
}

impl ArchivesRequest {
    /// Creates a new builder for constructing an `ArchivesRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, endpoint: impl Into<String>) -> ArchivesRequestBuilder {
        ArchivesRequestBuilder::new(method, endpoint)
    }

    /// Returns the query parameters encoded as `(key, value)` string pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.query.len());
        for (key, value) in &self.query {
            value.append_pairs(key, &mut pairs);
        }
        pairs
    }
}

/// Builder for constructing [`ArchivesRequest`] instances.
#[derive(Debug)]
pub struct ArchivesRequestBuilder {
    method: HttpMethod,
    endpoint: String,
    query: Vec<(String, QueryValue)>,
    extra_headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl ArchivesRequestBuilder {
    fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            extra_headers: HashMap::new(),
            body: None,
        }
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, QueryValue)>) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Replaces all extra headers.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = headers;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the [`ArchivesRequest`].
    #[must_use]
    pub fn build(self) -> ArchivesRequest {
        ArchivesRequest {
            method: self.method,
            endpoint: self.endpoint,
            query: self.query,
            extra_headers: self.extra_headers,
            body: self.body,
        }
    }
}

/// Query parameters for a catalog search.
///
/// No parameter is required or validated client-side; the API reports
/// unknown or malformed parameters with `400 Bad Request`.
///
/// # Example
///
/// ```rust
/// use archiwrap::SearchParams;
///
/// let params = SearchParams::new()
///     .q("World War II")
///     .param("limit", 10)
///     .param("recordGroupNumber", vec![59, 84]);
///
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchParams {
    params: Vec<(String, QueryValue)>,
}

impl SearchParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query (`q`).
    #[must_use]
    pub fn q(self, query: impl Into<String>) -> Self {
        self.param("q", query.into())
    }

    /// Adds an arbitrary parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Consumes the set, returning its parameters in insertion order.
    #[must_use]
    pub fn into_query(self) -> Vec<(String, QueryValue)> {
        self.params
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_builder_creates_plain_get_request() {
        let request = ArchivesRequest::builder(HttpMethod::Get, "search").build();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.endpoint, "search");
        assert!(request.query.is_empty());
        assert!(request.extra_headers.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_builder_with_body() {
        let request = ArchivesRequest::builder(HttpMethod::Post, "search")
            .body(json!({"q": "test"}))
            .build();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({"q": "test"})));
    }

    #[test]
    fn test_query_pairs_preserve_order_and_expand_lists() {
        let request = ArchivesRequest::builder(HttpMethod::Get, "search")
            .query_param("q", "constitution")
            .query_param("typeOfMaterials", vec!["Textual Records", "Photographs"])
            .query_param("limit", 5)
            .query_param("abbreviated", false)
            .query_param("score", 0.5)
            .build();

        let pairs = request.query_pairs();
        let expected: Vec<(String, String)> = [
            ("q", "constitution"),
            ("typeOfMaterials", "Textual Records"),
            ("typeOfMaterials", "Photographs"),
            ("limit", "5"),
            ("abbreviated", "false"),
            ("score", "0.5"),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_whole_float_keeps_fractional_part() {
        let request = ArchivesRequest::builder(HttpMethod::Get, "search")
            .query_param("score", 1.0)
            .query_param("weights", vec![2.0, 0.25])
            .build();

        let pairs = request.query_pairs();
        assert_eq!(pairs[0], ("score".to_string(), "1.0".to_string()));
        assert_eq!(pairs[1], ("weights".to_string(), "2.0".to_string()));
        assert_eq!(pairs[2], ("weights".to_string(), "0.25".to_string()));
    }

    #[test]
    fn test_empty_list_produces_no_pairs() {
        let request = ArchivesRequest::builder(HttpMethod::Get, "search")
            .query_param("ids", Vec::<i64>::new())
            .build();
        assert!(request.query_pairs().is_empty());
    }

    #[test]
    fn test_builder_with_extra_headers() {
        let request = ArchivesRequest::builder(HttpMethod::Get, "search")
            .header("Custom-Header", "test-value")
            .build();

        assert_eq!(
            request.extra_headers.get("Custom-Header"),
            Some(&"test-value".to_string())
        );

        let mut headers = HashMap::new();
        headers.insert("A".to_string(), "1".to_string());
        let request = ArchivesRequest::builder(HttpMethod::Get, "search")
            .header("B", "2")
            .extra_headers(headers)
            .build();
        assert_eq!(request.extra_headers.len(), 1);
        assert!(request.extra_headers.contains_key("A"));
    }

    #[test]
    fn test_search_params_builder() {
        let params = SearchParams::new().q("World War II").param("limit", 10);

        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
        assert_eq!(
            params.into_query(),
            vec![
                ("q".to_string(), QueryValue::Str("World War II".to_string())),
                ("limit".to_string(), QueryValue::Int(10)),
            ]
        );
    }

    #[test]
    fn test_search_params_from_iterator() {
        let params: SearchParams = [("q", "apollo"), ("invalid_param", "test")]
            .into_iter()
            .collect();

        assert_eq!(params.len(), 2);
        assert!(SearchParams::new().is_empty());
    }
}
