//! Error types for the archiwrap client.
//!
//! Every failure surfaced to callers is an [`ArchiError`]. It carries a
//! human-readable message, an [`ErrorKind`] for programmatic matching, and an
//! optional diagnostics payload describing the response that caused it.
//!
//! Configuration problems are first raised as [`ConfigError`] by the
//! validated newtypes and builders, then converted into an [`ArchiError`] of
//! kind [`ErrorKind::Configuration`] when they reach the client constructors.
//!
//! # Example
//!
//! ```rust
//! use archiwrap::{ArchivesClient, ErrorKind};
//!
//! let err = ArchivesClient::new("").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//! assert!(err.to_string().contains("API key is required"));
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

/// Structured diagnostic data attached to an [`ArchiError`].
///
/// Keys are diagnostic field names such as `status_code`, `content_type`,
/// `url` and `error`.
pub type Diagnostics = Map<String, Value>;

/// Errors that can occur while validating client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API key was empty or absent.
    #[error("API key is required for v2 API")]
    EmptyApiKey,

    /// The base URL could not be used to build request URLs.
    #[error("Invalid base URL '{url}'. Expected a URL with scheme and host (e.g., 'https://catalog.archives.gov/api/v2').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The HTTP transport or its runtime could not be created.
    #[error("Failed to initialize HTTP transport: {reason}")]
    TransportInit {
        /// Description of the underlying failure.
        reason: String,
    },
}

/// Classification of an [`ArchiError`].
///
/// The message remains the primary contract; the kind exists so callers can
/// `match` instead of searching message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid client configuration, raised at construction time.
    Configuration,
    /// The request never produced a response (DNS, connect, TLS, timeout).
    RequestFailed,
    /// The response `content-type` was not `application/json`.
    NonJsonResponse,
    /// The API answered `400 Bad Request`.
    InvalidParameter,
    /// The API answered with any other 4xx or 5xx status.
    HttpStatus,
    /// The response declared JSON but its body did not parse.
    InvalidJsonResponse,
}

/// The single error type returned by the archiwrap client.
///
/// `Display` renders the message, followed by ` - ` and the diagnostics as
/// JSON when diagnostics are attached.
///
/// # Example
///
/// ```rust
/// use archiwrap::{ArchiError, ErrorKind};
/// use serde_json::json;
///
/// let err = ArchiError::new(ErrorKind::InvalidParameter, "Invalid parameter")
///     .with_diagnostic("status_code", json!(400));
///
/// assert_eq!(err.to_string(), r#"Invalid parameter - {"status_code":400}"#);
/// assert_eq!(err.status_code(), Some(400));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}{}", render_diagnostics(.diagnostics))]
pub struct ArchiError {
    kind: ErrorKind,
    message: String,
    diagnostics: Option<Diagnostics>,
}

impl ArchiError {
    /// Creates an error without diagnostics.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            diagnostics: None,
        }
    }

    /// Replaces the diagnostics payload.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Adds a single diagnostic field.
    #[must_use]
    pub fn with_diagnostic(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.diagnostics
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message without diagnostics.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the diagnostics payload, if any.
    #[must_use]
    pub const fn diagnostics(&self) -> Option<&Diagnostics> {
        self.diagnostics.as_ref()
    }

    /// Looks up a single diagnostic field.
    #[must_use]
    pub fn diagnostic(&self, name: &str) -> Option<&Value> {
        self.diagnostics.as_ref().and_then(|d| d.get(name))
    }

    /// Returns the HTTP status code recorded in the diagnostics, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.diagnostic("status_code")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
    }
}

impl From<ConfigError> for ArchiError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Configuration, err.to_string())
    }
}

#[allow(clippy::ref_option)]
fn render_diagnostics(diagnostics: &Option<Diagnostics>) -> String {
    match diagnostics {
        Some(map) if !map.is_empty() => {
            let rendered = serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string());
            format!(" - {rendered}")
        }
        _ => String::new(),
    }
}
