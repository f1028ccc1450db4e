//! A blocking wrapper around [`ArchivesClient`](crate::ArchivesClient).
//!
//! Each call blocks the current thread until the single request completes,
//! fails, or hits the transport timeout. The wrapper owns a current-thread
//! tokio runtime and drives the async client on it.
//!
//! # Example
//!
//! ```rust,ignore
//! use archiwrap::blocking::ArchivesClient;
//! use archiwrap::SearchParams;
//!
//! let client = ArchivesClient::new("my-api-key")?;
//! let results = client.search(SearchParams::new().q("moon landing"))?;
//! ```

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::clients::{ArchivesRequest, ReqwestTransport, SearchParams, Transport};
use crate::config::ClientConfig;
use crate::error::{ArchiError, ConfigError};

/// Blocking client for the National Archives catalog API.
///
/// # Panics
///
/// Calls panic if made from within an async runtime. Use the async
/// [`ArchivesClient`](crate::ArchivesClient) there instead.
#[derive(Debug)]
pub struct ArchivesClient<T = ReqwestTransport> {
    inner: crate::clients::ArchivesClient<T>,
    runtime: Runtime,
}

// Verify the blocking ArchivesClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArchivesClient>();
};

impl ArchivesClient<ReqwestTransport> {
    /// Creates a blocking client for the default catalog base URL.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if
    /// `api_key` is empty or the runtime cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ArchiError> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    /// Creates a blocking client for a custom base URL.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new), plus an invalid `base_url`.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ArchiError> {
        let inner = crate::clients::ArchivesClient::with_base_url(api_key, base_url)?;
        Self::wrap(inner)
    }

    /// Creates a blocking client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// transport or runtime cannot be created.
    pub fn from_config(config: ClientConfig) -> Result<Self, ArchiError> {
        Self::wrap(crate::clients::ArchivesClient::from_config(config)?)
    }
}

impl<T: Transport> ArchivesClient<T> {
    /// Creates a blocking client that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// runtime cannot be created.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ArchiError> {
        Self::wrap(crate::clients::ArchivesClient::with_transport(
            config, transport,
        ))
    }

    /// Wraps an existing async client.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiError`] of kind
    /// [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if the
    /// runtime cannot be created.
    pub fn wrap(inner: crate::clients::ArchivesClient<T>) -> Result<Self, ArchiError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConfigError::TransportInit {
                reason: e.to_string(),
            })?;
        Ok(Self { inner, runtime })
    }

    /// Returns the wrapped async client.
    #[must_use]
    pub const fn inner(&self) -> &crate::clients::ArchivesClient<T> {
        &self.inner
    }

    /// Searches the catalog, blocking until the response is classified.
    ///
    /// # Errors
    ///
    /// See [`ArchivesClient::execute`](crate::ArchivesClient::execute).
    pub fn search(&self, params: SearchParams) -> Result<Value, ArchiError> {
        self.runtime.block_on(self.inner.search(params))
    }

    /// Sends a request, blocking until the response is classified.
    ///
    /// # Errors
    ///
    /// See [`ArchivesClient::execute`](crate::ArchivesClient::execute).
    pub fn execute(&self, request: ArchivesRequest) -> Result<Value, ArchiError> {
        self.runtime.block_on(self.inner.execute(request))
    }
}
