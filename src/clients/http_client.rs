//! HTTP client for Listex API communication.
//!
//! This module provides the [`HttpClient`] type, which assembles requests
//! (authentication, format, conditional tag, JSON payload), hands them to a
//! [`Transport`] and parses what comes back.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::clients::errors::ListexError;
use crate::clients::http_request::RequestSpec;
use crate::clients::http_response::{RawResponse, UsageLimit};
use crate::clients::status::classify;
use crate::clients::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::{ListexConfig, ResponseFormat};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the parameter that selects the response format.
pub const FORMAT_PARAM: &str = "format";

/// HTTP client for making requests to the Listex API.
///
/// The client handles:
/// - URL construction from the configured base URL, version and resource
/// - Injection of the API key and response format parameters
/// - `If-None-Match` headers for conditional requests
/// - Response header parsing and status classification
///
/// # Last response
///
/// Every call returns its own [`RawResponse`]. The client additionally keeps
/// the status and headers of the most recent call, readable through
/// [`last_http_code`](Self::last_http_code), [`last_etag`](Self::last_etag)
/// and friends. That slot is cleared when a call starts, so a transport
/// failure leaves it empty rather than stale. When one client is shared
/// between tasks, read header values from the returned response instead.
///
/// # Example
///
/// ```rust,ignore
/// use listex_api::{ListexConfig, HttpClient};
/// use listex_api::clients::{RequestSpec, Resource};
///
/// let config = ListexConfig::with_api_key("my-api-key")?;
/// let client = HttpClient::new(&config);
///
/// let spec = RequestSpec::builder(Resource::Product)
///     .param("good_id", 42)
///     .build()?;
///
/// let response = client.request(&spec).await?;
/// println!("{} (etag {:?})", response.text(), response.etag());
/// ```
#[derive(Debug)]
pub struct HttpClient<T = ReqwestTransport> {
    transport: T,
    config: ListexConfig,
    format: ResponseFormat,
    default_headers: HashMap<String, String>,
    last_response: Mutex<RawResponse>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient<ReqwestTransport> {
    /// Creates a client that sends requests with [`ReqwestTransport`].
    #[must_use]
    pub fn new(config: &ListexConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> HttpClient<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: &ListexConfig, transport: T) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!(
            "{user_agent_prefix}Listex Rust API client v{SDK_VERSION} | API {}",
            config.api_version()
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            transport,
            config: config.clone(),
            format: config.format(),
            default_headers,
            last_response: Mutex::new(RawResponse::default()),
        }
    }

    /// Returns the configuration this client was created with.
    #[must_use]
    pub const fn config(&self) -> &ListexConfig {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the response format requested when a request sets none.
    #[must_use]
    pub const fn format(&self) -> ResponseFormat {
        self.format
    }

    /// Changes the response format for subsequent requests.
    pub fn set_format(&mut self, format: ResponseFormat) {
        self.format = format;
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Assembles the transport request for `spec` without sending it.
    ///
    /// The API key and `format` parameters are inserted after the caller's
    /// parameters, so a caller-supplied `format` (or key parameter) is
    /// replaced. All parameters go into the query string for every method.
    ///
    /// # Errors
    ///
    /// Returns [`ListexError::InvalidArgument`] if the spec fails
    /// [`RequestSpec::verify`].
    pub fn build_request(&self, spec: &RequestSpec) -> Result<TransportRequest, ListexError> {
        spec.verify()?;

        let format = spec.format.unwrap_or(self.format);
        let mut params = spec.params.clone();
        params.insert(
            self.config.api_version().auth_param().to_string(),
            self.config.api_key().as_ref().to_string(),
        );
        params.insert(FORMAT_PARAM.to_string(), format.as_str().to_string());

        let url = format!(
            "{}/{}/{}?{}",
            self.config.base_url(),
            self.config.api_version(),
            spec.resource,
            encode_query(&params)
        );

        let mut headers: Vec<(String, String)> = self
            .default_headers
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        headers.push(("Accept".to_string(), format.mime_type().to_string()));
        if let Some(etag) = &spec.etag {
            headers.push(("If-None-Match".to_string(), format!("\"{etag}\"")));
        }

        let body = spec.payload.as_ref().map(|payload| {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            payload.to_string()
        });

        Ok(TransportRequest {
            method: spec.method,
            url,
            headers,
            body,
        })
    }

    /// Sends a request and returns the parsed response without classifying
    /// its status code.
    ///
    /// # Errors
    ///
    /// Returns [`ListexError::InvalidArgument`] if the spec is invalid (no
    /// request is sent) and [`ListexError::Transport`] if the transport fails.
    pub async fn send(&self, spec: &RequestSpec) -> Result<RawResponse, ListexError> {
        *self.lock_last_response() = RawResponse::default();

        let request = self.build_request(spec)?;
        tracing::debug!(
            "Sending {} request to Listex resource {} (conditional: {})",
            request.method,
            spec.resource,
            spec.etag.is_some()
        );

        let raw = self.transport.send(request).await?;
        let response = RawResponse::from_raw(raw.status, &raw.raw, raw.header_size);
        tracing::debug!(
            "Listex resource {} responded with status {} ({} body bytes)",
            spec.resource,
            response.status,
            response.body.len()
        );

        *self.lock_last_response() = RawResponse::new(response.status, response.headers.clone(), "");
        Ok(response)
    }

    /// Sends a request and classifies the response.
    ///
    /// On success the returned response carries the classified body: the
    /// body as received for 200, an empty body for 404.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`send`](Self::send), plus the
    /// [`ListexError`] variant mapped to any other status code.
    pub async fn request(&self, spec: &RequestSpec) -> Result<RawResponse, ListexError> {
        let response = self.send(spec).await?;

        if response.status == 429 {
            if let Some(seconds) = response.retry_after() {
                tracing::warn!(
                    "Listex request limit reached for resource {}, retry after {} seconds",
                    spec.resource,
                    seconds
                );
            }
        }

        let RawResponse {
            status,
            headers,
            body,
        } = response;
        let body = classify(status, body)?;
        Ok(RawResponse::new(status, headers, body))
    }

    /// Returns a copy of the most recent response's status and headers.
    ///
    /// The body is not retained.
    #[must_use]
    pub fn last_response(&self) -> RawResponse {
        self.lock_last_response().clone()
    }

    /// Returns the status code of the most recent response, or 0 if the
    /// last call received none.
    #[must_use]
    pub fn last_http_code(&self) -> u16 {
        self.lock_last_response().status
    }

    /// Returns the entity tag of the most recent response.
    #[must_use]
    pub fn last_etag(&self) -> Option<String> {
        self.lock_last_response().etag().map(String::from)
    }

    /// Returns the usage quota reported by the most recent response.
    #[must_use]
    pub fn last_usage(&self) -> Option<UsageLimit> {
        self.lock_last_response().usage()
    }

    /// Returns the number of requests used in the current window.
    #[must_use]
    pub fn current_usage_count(&self) -> Option<u64> {
        self.lock_last_response().current_usage_count()
    }

    /// Returns the number of requests allowed in the current window.
    #[must_use]
    pub fn usage_limit(&self) -> Option<u64> {
        self.lock_last_response().usage_limit()
    }

    /// Returns the seconds until access is granted again.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.lock_last_response().retry_after()
    }

    fn lock_last_response(&self) -> MutexGuard<'_, RawResponse> {
        self.last_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Encodes parameters as a query string in key order.
fn encode_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
