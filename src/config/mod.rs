//! Configuration types for the Listex API client.
//!
//! # Overview
//!
//! - [`ListexConfig`]: the settings shared by every request of a client
//! - [`ListexConfigBuilder`]: builder for [`ListexConfig`]
//! - [`ApiKey`]: a validated API key with masked debug output
//! - [`BaseUrl`]: a validated host override
//! - [`ApiVersion`]: the Listex API generation to talk to
//! - [`ResponseFormat`]: JSON or XML response bodies
//!
//! # Example
//!
//! ```rust
//! use listex_api::{ListexConfig, ApiKey, ApiVersion, ResponseFormat};
//!
//! let config = ListexConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_version(ApiVersion::V3)
//!     .format(ResponseFormat::Xml)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.listex.info");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, BaseUrl};
pub use version::{ApiVersion, ResponseFormat};

use crate::error::ConfigError;

/// Configuration for a Listex API client.
///
/// `ListexConfig` is immutable once built. The response format stored here is
/// the client's initial format; clients can switch it afterwards.
#[derive(Clone, Debug)]
pub struct ListexConfig {
    api_key: ApiKey,
    format: ResponseFormat,
    api_version: ApiVersion,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ListexConfig {
    /// Creates a new builder for constructing a `ListexConfig`.
    #[must_use]
    pub fn builder() -> ListexConfigBuilder {
        ListexConfigBuilder::new()
    }

    /// Creates a configuration with default settings for the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn with_api_key(key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().api_key(ApiKey::new(key)?).build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the initial response format.
    #[must_use]
    pub const fn format(&self) -> ResponseFormat {
        self.format
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the base URL requests are sent to.
    ///
    /// This is the configured override, or the version's default host.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_ref()
            .map_or_else(|| self.api_version.default_base_url(), |url| url.as_ref())
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ListexConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ListexConfig>();
};

/// Builder for constructing [`ListexConfig`] instances.
///
/// `api_key` is required.
///
/// # Defaults
///
/// - `format`: [`ResponseFormat::Json`]
/// - `api_version`: [`ApiVersion::latest()`]
/// - `base_url`: the version's default host
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ListexConfigBuilder {
    api_key: Option<ApiKey>,
    format: Option<ResponseFormat>,
    api_version: Option<ApiVersion>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ListexConfigBuilder {
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

    /// Sets the initial response format.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Overrides the host requests are sent to.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ListexConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<ListexConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ListexConfig {
            api_key,
            format: self.format.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            base_url: self.base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
