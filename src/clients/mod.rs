//! HTTP client layer for the Listex API.
//!
//! # Overview
//!
//! - [`HttpClient`]: builds requests, sends them through a [`Transport`] and
//!   classifies the responses
//! - [`RequestSpec`]: one request to a [`Resource`]
//! - [`RawResponse`]: status, parsed headers and body of a response
//! - [`classify`]: maps status codes to a body or a [`ListexError`]
//! - [`Transport`] / [`ReqwestTransport`]: the network boundary
//!
//! # Request pipeline
//!
//! 1. The caller's parameters are copied, then the API key and `format`
//!    parameters are added (overwriting caller values of the same name).
//! 2. The URL is `<base-url>/<version>/<resource>?<query>` for every method.
//! 3. A conditional tag becomes `If-None-Match: "<tag>"`.
//! 4. POST, PUT and DELETE payloads are sent as JSON.
//! 5. The transport's raw bytes are split at the reported header size; the
//!    header block is parsed with [`parse_headers`].
//! 6. [`classify`] turns the status into the final outcome. There are no
//!    retries: 429 responses surface as [`ListexError::RequestLimitReached`]
//!    and the delay is available from [`RawResponse::retry_after`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod resource;
mod status;
mod transport;

pub use errors::{InvalidRequestError, ListexError, TransportError, TransportErrorKind};
pub use http_client::{HttpClient, FORMAT_PARAM, SDK_VERSION};
pub use http_request::{HttpMethod, RequestSpec, RequestSpecBuilder};
pub use http_response::{
    parse_headers, split_raw, RawResponse, UsageLimit, ETAG_HEADER, RETRY_AFTER_HEADER,
    USAGE_LIMIT_HEADER,
};
pub use resource::Resource;
pub use status::{classify, ApiStatus};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
