//! Transport-level error types.
//!
//! A [`TransportError`] means no HTTP response was obtained at all: DNS
//! failure, refused connection, TLS failure, timeout, or a body that could
//! not be read. The client converts it into an [`ArchiError`] of kind
//! [`ErrorKind::RequestFailed`] so the raw transport error type never reaches
//! callers.
//!
//! # Example
//!
//! ```rust
//! use archiwrap::clients::TransportError;
//! use archiwrap::{ArchiError, ErrorKind};
//!
//! let err: ArchiError = TransportError::Custom("connection refused".to_string()).into();
//! assert_eq!(err.kind(), ErrorKind::RequestFailed);
//! assert_eq!(err.to_string(), "Request failed: connection refused");
//! ```

use thiserror::Error;

use crate::error::{ArchiError, ErrorKind};

/// Error returned by a [`Transport`](crate::clients::Transport) when a request
/// produced no response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error raised by the reqwest-backed transport.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// Error raised by a custom transport implementation.
    #[error("{0}")]
    Custom(String),
}

impl From<TransportError> for ArchiError {
    fn from(err: TransportError) -> Self {
        Self::new(ErrorKind::RequestFailed, format!("Request failed: {err}"))
    }
}
