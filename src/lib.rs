//! # archiwrap
//!
//! A Rust client for the National Archives catalog API (v2).
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - An async [`ArchivesClient`] that authenticates each request with the
//!   `x-api-key` header and classifies every response
//! - A [`blocking::ArchivesClient`] for synchronous callers
//! - Recursive snake_case normalization of response keys via [`case`]
//! - A single [`ArchiError`] type for every failure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use archiwrap::{ArchivesClient, SearchParams};
//!
//! let client = ArchivesClient::new(std::env::var("NARA_API_KEY")?)?;
//!
//! let results = client
//!     .search(SearchParams::new().q("World War II").param("limit", 10))
//!     .await?;
//!
//! // Keys arrive as camelCase and are returned as snake_case
//! println!("{}", results["body"]["hits"]["total"]["value"]);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use archiwrap::{ApiKey, BaseUrl, ClientConfig};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://catalog.archives.gov/api/v2/").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://catalog.archives.gov/api/v2");
//! ```
//!
//! [`ClientConfig::from_env`] reads the key from `NARA_API_KEY` and an
//! optional base URL from `NARA_BASE_URL`.
//!
//! ## Error Handling
//!
//! Every failure is an [`ArchiError`]. Match on [`ArchiError::kind`] or
//! inspect the message; [`ArchiError::diagnostics`] carries the status code,
//! content type and URL when they are known.
//!
//! ```rust,ignore
//! use archiwrap::ErrorKind;
//!
//! match client.search(params).await {
//!     Ok(body) => println!("{body}"),
//!     Err(e) if e.kind() == ErrorKind::InvalidParameter => println!("bad query: {e}"),
//!     Err(e) => println!("search failed: {e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and headers are owned by each client
//! - **Fail-fast validation**: An empty API key fails at construction
//! - **One request per call**: No retries, caching or pagination
//! - **Thread-safe**: Clients are `Send + Sync`

pub mod blocking;
pub mod case;
pub mod clients;
pub mod config;
pub mod error;

pub use config::{ApiKey, BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::{ArchiError, ConfigError, Diagnostics, ErrorKind};

pub use clients::{
    ArchivesClient, ArchivesRequest, ArchivesRequestBuilder, HttpMethod, QueryValue, RawResponse,
    ReqwestTransport, SearchParams, Transport, TransportError, TransportRequest, SDK_VERSION,
};
