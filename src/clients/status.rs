//! Status code classification.
//!
//! Every response passes through [`classify`], which either hands the body
//! back or turns the status code into a [`ListexError`]. The mapping is a
//! pure function of the status code.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200 | body passed through |
//! | 304 | [`ListexError::NotModified`] |
//! | 400 | [`ListexError::RequestError`] with the raw body |
//! | 401 | [`ListexError::NotAuthorized`] |
//! | 403 | [`ListexError::NoAccess`] |
//! | 404 | empty body, not an error |
//! | 405 | [`ListexError::MethodNotAllowed`] |
//! | 423 | [`ListexError::Locked`] |
//! | 429 | [`ListexError::RequestLimitReached`] |
//! | 500 | [`ListexError::InternalServerError`] |
//! | 501 | [`ListexError::MethodNotFound`] |
//! | 503 | [`ListexError::ServiceNotAvailable`] |
//! | other | [`ListexError::Unknown`] |

use crate::clients::errors::ListexError;

/// Status codes with a defined meaning in the Listex API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiStatus {
    /// 200
    Ok,
    /// 304
    NotModified,
    /// 400
    RequestError,
    /// 401
    NotAuthorized,
    /// 403
    NoAccess,
    /// 404: no data found
    NoDataFound,
    /// 405
    MethodNotAllowed,
    /// 423
    Locked,
    /// 429
    RequestLimitReached,
    /// 500
    InternalServerError,
    /// 501
    MethodNotFound,
    /// 503
    ServiceNotAvailable,
    /// Any other code.
    Other(u16),
}

impl ApiStatus {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotModified => 304,
            Self::RequestError => 400,
            Self::NotAuthorized => 401,
            Self::NoAccess => 403,
            Self::NoDataFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Locked => 423,
            Self::RequestLimitReached => 429,
            Self::InternalServerError => 500,
            Self::MethodNotFound => 501,
            Self::ServiceNotAvailable => 503,
            Self::Other(code) => *code,
        }
    }
}

impl From<u16> for ApiStatus {
    fn from(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            304 => Self::NotModified,
            400 => Self::RequestError,
            401 => Self::NotAuthorized,
            403 => Self::NoAccess,
            404 => Self::NoDataFound,
            405 => Self::MethodNotAllowed,
            423 => Self::Locked,
            429 => Self::RequestLimitReached,
            500 => Self::InternalServerError,
            501 => Self::MethodNotFound,
            503 => Self::ServiceNotAvailable,
            other => Self::Other(other),
        }
    }
}

/// Classifies a response by status code.
///
/// Returns the body unchanged for 200 and an empty body for 404.
///
/// # Errors
///
/// Returns the [`ListexError`] variant mapped to every other status code.
///
/// # Example
///
/// ```rust
/// use listex_api::clients::classify;
/// use listex_api::ListexError;
///
/// assert_eq!(classify(200, b"{}".to_vec()).unwrap(), b"{}");
/// assert!(classify(404, b"missing".to_vec()).unwrap().is_empty());
/// assert!(matches!(
///     classify(400, b"bad".to_vec()),
///     Err(ListexError::RequestError { code: 400, body }) if body == b"bad"
/// ));
/// ```
pub fn classify(status: u16, body: Vec<u8>) -> Result<Vec<u8>, ListexError> {
    let code = status;
    match ApiStatus::from(status) {
        ApiStatus::Ok => Ok(body),
        ApiStatus::NoDataFound => Ok(Vec::new()),
        ApiStatus::NotModified => Err(ListexError::NotModified { code }),
        ApiStatus::RequestError => Err(ListexError::RequestError { code, body }),
        ApiStatus::NotAuthorized => Err(ListexError::NotAuthorized { code }),
        ApiStatus::NoAccess => Err(ListexError::NoAccess { code }),
        ApiStatus::MethodNotAllowed => Err(ListexError::MethodNotAllowed { code }),
        ApiStatus::Locked => Err(ListexError::Locked { code }),
        ApiStatus::RequestLimitReached => Err(ListexError::RequestLimitReached { code }),
        ApiStatus::InternalServerError => Err(ListexError::InternalServerError { code }),
        ApiStatus::MethodNotFound => Err(ListexError::MethodNotFound { code }),
        ApiStatus::ServiceNotAvailable => Err(ListexError::ServiceNotAvailable { code }),
        ApiStatus::Other(_) => Err(ListexError::Unknown { code }),
    }
}
