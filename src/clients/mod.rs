//! HTTP client types for catalog API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ArchivesClient`]: The async client that sends requests and classifies responses
//! - [`ArchivesRequest`]: A request to be sent to the API
//! - [`SearchParams`]: Query parameters for [`ArchivesClient::search`]
//! - [`RawResponse`]: An unclassified response as returned by a transport
//! - [`Transport`]: The seam between the client and an HTTP stack
//! - [`ReqwestTransport`]: The default reqwest-backed transport
//!
//! # Example
//!
//! ```rust,ignore
//! use archiwrap::clients::{ArchivesClient, ArchivesRequest, HttpMethod};
//!
//! let client = ArchivesClient::new("my-api-key")?;
//!
//! let request = ArchivesRequest::builder(HttpMethod::Get, "search")
//!     .query_param("q", "Apollo 11")
//!     .query_param("limit", 5)
//!     .build();
//!
//! let body = client.execute(request).await?;
//! ```
//!
//! # Response Classification
//!
//! Responses are checked in a fixed order, and the first failing check wins:
//!
//! 1. A `content-type` without `application/json` fails as non-JSON, whatever the status
//! 2. Status 400 fails as an invalid parameter
//! 3. Any other status of 400 or above fails as an HTTP error
//! 4. A body that does not parse fails as invalid JSON

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::TransportError;
pub use http_client::{
    parse_response, ArchivesClient, API_KEY_HEADER, SDK_VERSION, SEARCH_ENDPOINT,
};
pub use http_request::{
    ArchivesRequest, ArchivesRequestBuilder, HttpMethod, QueryValue, SearchParams,
};
pub use http_response::RawResponse;
pub use transport::{ReqwestTransport, Transport, TransportRequest};
