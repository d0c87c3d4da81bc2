//! Request description types for the Listex API client.
//!
//! A [`RequestSpec`] names a resource, carries the caller's parameters and
//! optionally a conditional tag and a JSON payload. Authentication and the
//! response format are added later by
//! [`HttpClient::send`](crate::clients::HttpClient::send).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::clients::errors::InvalidRequestError;
use crate::clients::resource::Resource;
use crate::config::ResponseFormat;

/// HTTP methods accepted by the Listex API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET, used by every read-only resource.
    #[default]
    Get,
    /// HTTP POST, used to submit reviews and create assortments.
    Post,
    /// HTTP PUT, used to replace assortments.
    Put,
    /// HTTP DELETE, used to remove assortments.
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
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if requests with this method may carry a JSON payload.
    #[must_use]
    pub const fn allows_payload(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(InvalidRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// A single request to a Listex resource.
///
/// Parameters are kept in key order and are always sent in the query
/// string, whatever the method. Use [`RequestSpec::builder`] to construct one.
///
/// # Example
///
/// ```rust
/// use listex_api::clients::{HttpMethod, RequestSpec, Resource};
///
/// let spec = RequestSpec::builder(Resource::Product)
///     .param("good_id", 42)
///     .if_none_match("5f2b")
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.method, HttpMethod::Get);
/// assert_eq!(spec.params.get("good_id").map(String::as_str), Some("42"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    /// The resource the request is addressed to.
    pub resource: Resource,
    /// Query parameters, rendered to strings.
    pub params: BTreeMap<String, String>,
    /// The HTTP method.
    pub method: HttpMethod,
    /// JSON payload for POST, PUT and DELETE requests.
    pub payload: Option<serde_json::Value>,
    /// Conditional tag sent as `If-None-Match`.
    pub etag: Option<String>,
    /// Per-request response format; the client's format is used when unset.
    pub format: Option<ResponseFormat>,
}

impl RequestSpec {
    /// Creates a new builder for a request to `resource`.
    #[must_use]
    pub fn builder(resource: Resource) -> RequestSpecBuilder {
        RequestSpecBuilder::new(resource)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::PayloadNotAllowed`] if a payload is
    /// attached to a GET request.
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.payload.is_some() && !self.method.allows_payload() {
            return Err(InvalidRequestError::PayloadNotAllowed {
                method: self.method.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`RequestSpec`] instances.
#[derive(Debug)]
pub struct RequestSpecBuilder {
    resource: Resource,
    params: BTreeMap<String, String>,
    method: Result<HttpMethod, InvalidRequestError>,
    payload: Option<serde_json::Value>,
    etag: Option<String>,
    format: Option<ResponseFormat>,
}

impl RequestSpecBuilder {
    fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: BTreeMap::new(),
            method: Ok(HttpMethod::Get),
            payload: None,
            etag: None,
            format: None,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Ok(method);
        self
    }

    /// Sets the HTTP method from its name.
    ///
    /// An unsupported name makes [`build`](Self::build) fail with
    /// [`InvalidRequestError::InvalidMethod`].
    #[must_use]
    pub fn verb(mut self, verb: &str) -> Self {
        self.method = verb.parse();
        self
    }

    /// Adds a single parameter, replacing any previous value for `key`.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Adds a parameter only when `value` is present.
    #[must_use]
    pub fn param_opt<V: fmt::Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Adds every parameter in `params`.
    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        for (key, value) in params {
            self.params.insert(key.into(), value.to_string());
        }
        self
    }

    /// Sets the JSON payload.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<serde_json::Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Sets the conditional tag sent as `If-None-Match`.
    #[must_use]
    pub fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the response format for this request only.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Builds the [`RequestSpec`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the verb is unsupported or the
    /// request fails [`RequestSpec::verify`].
    pub fn build(self) -> Result<RequestSpec, InvalidRequestError> {
        let spec = RequestSpec {
            resource: self.resource,
            params: self.params,
            method: self.method?,
            payload: self.payload,
            etag: self.etag,
            format: self.format,
        };
        spec.verify()?;
        Ok(spec)
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
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn test_http_method_rejects_unsupported_verbs() {
        for verb in ["PATCH", "HEAD", "OPTIONS", ""] {
            assert!(matches!(
                verb.parse::<HttpMethod>(),
                Err(InvalidRequestError::InvalidMethod { method }) if method == verb
            ));
        }
    }

    #[test]
    fn test_builder_defaults_to_get_without_payload() {
        let spec = RequestSpec::builder(Resource::Categories).build().unwrap();

        assert_eq!(spec.resource, Resource::Categories);
        assert_eq!(spec.method, HttpMethod::Get);
        assert!(spec.params.is_empty());
        assert!(spec.payload.is_none());
        assert!(spec.etag.is_none());
        assert!(spec.format.is_none());
    }

    #[test]
    fn test_builder_renders_scalar_params() {
        let spec = RequestSpec::builder(Resource::Image)
            .param("name", "1234.jpg")
            .param("width", 300)
            .param("no_background", 1)
            .param_opt("height", None::<u32>)
            .build()
            .unwrap();

        assert_eq!(spec.params.len(), 3);
        assert_eq!(spec.params["width"], "300");
        assert!(!spec.params.contains_key("height"));
    }

    #[test]
    fn test_later_param_replaces_earlier_value() {
        let spec = RequestSpec::builder(Resource::Brands)
            .params([("party_id", 1)])
            .param("party_id", 2)
            .build()
            .unwrap();

        assert_eq!(spec.params["party_id"], "2");
    }

    #[test]
    fn test_verb_string_with_unsupported_method_fails_build() {
        let result = RequestSpec::builder(Resource::Brands).verb("PATCH").build();

        assert!(matches!(
            result,
            Err(InvalidRequestError::InvalidMethod { method }) if method == "PATCH"
        ));
    }

    #[test]
    fn test_payload_rejected_on_get() {
        let result = RequestSpec::builder(Resource::Assortment)
            .payload(json!({"items": []}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidRequestError::PayloadNotAllowed { method }) if method == "GET"
        ));
    }

    #[test]
    fn test_payload_accepted_on_mutation_verbs() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete] {
            let spec = RequestSpec::builder(Resource::Assortment)
                .method(method)
                .payload(json!({"items": [1, 2]}))
                .build()
                .unwrap();
            assert_eq!(spec.payload, Some(json!({"items": [1, 2]})));
        }
    }
}
