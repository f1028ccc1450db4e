//! Configuration types for the archiwrap client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Immutable settings held by a client instance
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use archiwrap::{ApiKey, BaseUrl, ClientConfig};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://catalog.archives.gov/api/v2").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://catalog.archives.gov/api/v2");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL of the National Archives catalog v2 API.
pub const DEFAULT_BASE_URL: &str = "https://catalog.archives.gov/api/v2";

/// User-Agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "ArchiwrapClient/1.0";

/// Environment variable holding the API key, read by [`ClientConfig::from_env`].
pub const API_KEY_ENV: &str = "NARA_API_KEY";

/// Environment variable overriding the base URL, read by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "NARA_BASE_URL";

/// Configuration for an archives client.
///
/// The configuration is immutable once built. Clients clone what they need
/// from it at construction time.
///
/// # Example
///
/// ```rust
/// use archiwrap::{ApiKey, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), archiwrap::config::DEFAULT_BASE_URL);
/// assert_eq!(config.user_agent(), "ArchiwrapClient/1.0");
/// assert!(config.timeout().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    user_agent: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Creates a configuration with the given key and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().api_key(ApiKey::new(api_key)?).build()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads the API key from `NARA_API_KEY` and, when set, the base URL from
    /// `NARA_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if `NARA_API_KEY` is unset or
    /// empty, or [`ConfigError::InvalidBaseUrl`] if `NARA_BASE_URL` is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_ENV).map(|key| key.trim().to_string());
        let mut builder = Self::builder().api_key(ApiKey::new(api_key.unwrap_or_default())?);

        if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }

        builder.build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `api_key` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `user_agent`: [`DEFAULT_USER_AGENT`]
/// - `timeout`: `None` (the transport's own default)
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the transport timeout for a whole request.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set,
    /// or [`ConfigError::InvalidBaseUrl`] if the default base URL is rejected.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(ClientConfig {
            api_key,
            base_url,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = ClientConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_key().as_ref(), "key");
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .base_url(BaseUrl::new("http://localhost:3000/api/").unwrap())
            .user_agent("MyArchiveTool/2.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:3000/api");
        assert_eq!(config.user_agent(), "MyArchiveTool/2.0");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_new_rejects_empty_key() {
        assert!(matches!(
            ClientConfig::new(""),
            Err(ConfigError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_from_vars_reads_key_and_base_url() {
        let config = ClientConfig::from_vars(lookup_from(&[
            (API_KEY_ENV, "env-key"),
            (BASE_URL_ENV, "https://staging.example.com/api/v2/"),
        ]))
        .unwrap();

        assert_eq!(config.api_key().as_ref(), "env-key");
        assert_eq!(
            config.base_url().as_ref(),
            "https://staging.example.com/api/v2"
        );
    }

    #[test]
    fn test_from_vars_defaults_base_url() {
        let config = ClientConfig::from_vars(lookup_from(&[(API_KEY_ENV, "env-key")])).unwrap();
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);

        let config = ClientConfig::from_vars(lookup_from(&[
            (API_KEY_ENV, "env-key"),
            (BASE_URL_ENV, "  "),
        ]))
        .unwrap();
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_vars_requires_api_key() {
        assert!(matches!(
            ClientConfig::from_vars(lookup_from(&[])),
            Err(ConfigError::EmptyApiKey)
        ));
        assert!(matches!(
            ClientConfig::from_vars(lookup_from(&[(API_KEY_ENV, "   ")])),
            Err(ConfigError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_from_vars_rejects_invalid_base_url() {
        let result = ClientConfig::from_vars(lookup_from(&[
            (API_KEY_ENV, "env-key"),
            (BASE_URL_ENV, "not-a-url"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }

    #[test]
    fn test_config_debug_masks_api_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("super-secret"));
    }
}
