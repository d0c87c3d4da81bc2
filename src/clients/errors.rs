//! Error types for Listex API requests.
//!
//! - [`ListexError`]: every failure a request can end with, one variant per
//!   classified status code plus transport and argument failures
//! - [`InvalidRequestError`]: a request rejected before any network I/O
//! - [`TransportError`]: a failure reported by the underlying transport
//!
//! # Example
//!
//! ```rust,ignore
//! use listex_api::ListexError;
//!
//! match client.get_brands(None, Some(&cached_etag)).await {
//!     Ok(response) => store(&response.body),
//!     Err(ListexError::NotModified { .. }) => { /* reuse cached copy */ }
//!     Err(ListexError::RequestLimitReached { .. }) => {
//!         println!("retry after {:?}s", client.retry_after());
//!     }
//!     Err(e @ ListexError::RequestError { .. }) => println!("rejected: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Category of a transport-level failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The connection could not be established (DNS, refused, TLS).
    Connect,
    /// The transport gave up waiting for the server.
    Timeout,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be read.
    Body,
    /// Any other failure.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Body => "body",
            Self::Other => "other",
        };
        f.write_str(kind)
    }
}

/// Error reported by a [`Transport`](crate::clients::Transport) implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Transport error ({kind}): {message}")]
pub struct TransportError {
    /// The failure category.
    pub kind: TransportErrorKind,
    /// The transport's own description of the failure.
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else if error.is_request() || error.is_builder() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, error.to_string())
    }
}

/// Error returned when a request is rejected before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// The HTTP verb is not one of GET, POST, PUT or DELETE.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The verb that was provided.
        method: String,
    },

    /// A JSON payload was attached to a request that cannot carry one.
    #[error("Cannot send a payload with {method}.")]
    PayloadNotAllowed {
        /// The HTTP method of the request.
        method: String,
    },

    /// A parameter required by the operation was not supplied.
    #[error("Missing required parameter '{name}' for {operation}.")]
    MissingParameter {
        /// The operation being called.
        operation: &'static str,
        /// The missing parameter name.
        name: &'static str,
    },
}

/// Unified error type for Listex API requests.
///
/// Every status-derived variant carries the HTTP status code. Only
/// [`ListexError::RequestError`] keeps the response body, so callers can
/// inspect the server's explanation of a rejected request. A 404 response
/// is not an error: it yields an empty body.
#[derive(Debug, Error)]
pub enum ListexError {
    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request was rejected before being sent.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidRequestError),

    /// 304: the conditional tag still matches; reuse the cached copy.
    #[error("Not modified")]
    NotModified {
        /// The HTTP status code.
        code: u16,
    },

    /// 400: the server rejected the request.
    #[error("Request error: {}", String::from_utf8_lossy(.body))]
    RequestError {
        /// The HTTP status code.
        code: u16,
        /// The response body, byte for byte.
        body: Vec<u8>,
    },

    /// 401: the API key was not accepted.
    #[error("Not authorized")]
    NotAuthorized {
        /// The HTTP status code.
        code: u16,
    },

    /// 403: the key has no access to this resource.
    #[error("No access")]
    NoAccess {
        /// The HTTP status code.
        code: u16,
    },

    /// 405: the resource does not accept this verb.
    #[error("Method not allowed")]
    MethodNotAllowed {
        /// The HTTP status code.
        code: u16,
    },

    /// 423: the account or resource is locked.
    #[error("Locked")]
    Locked {
        /// The HTTP status code.
        code: u16,
    },

    /// 429: the usage quota for the current window is exhausted.
    #[error("Request limit reached")]
    RequestLimitReached {
        /// The HTTP status code.
        code: u16,
    },

    /// 500: the server failed to process the request.
    #[error("Internal server error")]
    InternalServerError {
        /// The HTTP status code.
        code: u16,
    },

    /// 501: the resource name is not known to the server.
    #[error("Method not found")]
    MethodNotFound {
        /// The HTTP status code.
        code: u16,
    },

    /// 503: the service is temporarily unavailable.
    #[error("Service not available")]
    ServiceNotAvailable {
        /// The HTTP status code.
        code: u16,
    },

    /// Any status code without a dedicated variant.
    #[error("Unknown error (HTTP {code})")]
    Unknown {
        /// The HTTP status code.
        code: u16,
    },
}

impl ListexError {
    /// Returns the HTTP status code for errors derived from a response.
    ///
    /// Transport and argument errors have no status code.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Transport(_) | Self::InvalidArgument(_) => None,
            Self::NotModified { code }
            | Self::RequestError { code, .. }
            | Self::NotAuthorized { code }
            | Self::NoAccess { code }
            | Self::MethodNotAllowed { code }
            | Self::Locked { code }
            | Self::RequestLimitReached { code }
            | Self::InternalServerError { code }
            | Self::MethodNotFound { code }
            | Self::ServiceNotAvailable { code }
            | Self::Unknown { code } => Some(*code),
        }
    }

    /// Returns `true` for a 304 response to a conditional request.
    #[must_use]
    pub const fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_message_includes_body() {
        let error = ListexError::RequestError {
            code: 400,
            body: br#"{"error":"bad gtin"}"#.to_vec(),
        };
        assert!(error.to_string().contains("bad gtin"));
        assert_eq!(error.code(), Some(400));
    }

    #[test]
    fn test_code_is_none_for_non_status_errors() {
        let transport = ListexError::from(TransportError::new(
            TransportErrorKind::Connect,
            "connection refused",
        ));
        assert_eq!(transport.code(), None);
        assert!(transport.to_string().contains("connect"));
        assert!(transport.to_string().contains("connection refused"));

        let invalid = ListexError::from(InvalidRequestError::InvalidMethod {
            method: "PATCH".to_string(),
        });
        assert_eq!(invalid.code(), None);
        assert_eq!(invalid.to_string(), "Invalid Http method PATCH.");
    }

    #[test]
    fn test_missing_parameter_message() {
        let error = InvalidRequestError::MissingParameter {
            operation: "suppliers",
            name: "identifier",
        };
        assert_eq!(
            error.to_string(),
            "Missing required parameter 'identifier' for suppliers."
        );
    }

    #[test]
    fn test_unknown_error_reports_code() {
        let error = ListexError::Unknown { code: 418 };
        assert!(error.to_string().contains("418"));
        assert!(!error.is_not_modified());
        assert!(ListexError::NotModified { code: 304 }.is_not_modified());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ListexError::Locked { code: 423 };
        let _: &dyn std::error::Error = &InvalidRequestError::PayloadNotAllowed {
            method: "GET".to_string(),
        };
        let _: &dyn std::error::Error = &TransportError::new(TransportErrorKind::Other, "x");
    }
}
