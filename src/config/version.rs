//! Listex API version and response format definitions.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listex API version.
///
/// The version decides the default host, the path segment placed before the
/// resource name and the name of the query parameter that carries the API key.
///
/// # Example
///
/// ```rust
/// use listex_api::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version.default_base_url(), "https://api.listex.info");
/// assert_eq!(version.auth_param(), "apikey");
///
/// let legacy: ApiVersion = "v2".parse().unwrap();
/// assert_eq!(legacy.auth_param(), "key");
/// assert_eq!(format!("{legacy}"), "v2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Legacy API served from `https://listex.info/api/v2`.
    V2,
    /// Current API served from `https://api.listex.info/v3`.
    V3,
}

impl ApiVersion {
    /// Returns the latest API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V3
    }

    /// Returns the host (and path prefix) the version is served from.
    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        if self.is_legacy() {
            "https://listex.info/api"
        } else {
            "https://api.listex.info"
        }
    }

    /// Returns the query parameter name used to send the API key.
    ///
    /// The legacy API expects `key`; later versions expect `apikey`.
    #[must_use]
    pub const fn auth_param(&self) -> &'static str {
        if self.is_legacy() {
            "key"
        } else {
            "apikey"
        }
    }

    /// Returns `true` for the legacy key-embedded API.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::V2)
    }

    /// Returns the path segment for this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

/// Format of the response body requested through the `format` parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// JSON bodies (`format=json`).
    #[default]
    Json,
    /// XML bodies (`format=xml`).
    Xml,
}

impl ResponseFormat {
    /// Returns the value sent in the `format` parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Returns the MIME type sent in the `Accept` header.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(ConfigError::InvalidResponseFormat { format: s }),
        }
    }
}
