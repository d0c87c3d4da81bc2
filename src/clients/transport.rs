//! Transport boundary for the Listex API client.
//!
//! The client never touches the network itself. It hands a
//! [`TransportRequest`] to a [`Transport`] and expects back the status
//! code, the raw response bytes (header block followed by body) and the
//! offset where the header block ends. [`ReqwestTransport`] is the default
//! implementation; tests and embedders can supply their own.

use std::future::Future;
use std::sync::Arc;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;

/// A fully assembled HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL including the query string.
    pub url: String,
    /// Request headers in the order they should be sent.
    pub headers: Vec<(String, String)>,
    /// The encoded request body, if any.
    pub body: Option<String>,
}

impl TransportRequest {
    /// Returns the first header value with the given name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The unparsed result of a transport round trip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// The final HTTP status code.
    pub status: u16,
    /// The header block followed by the body.
    pub raw: Vec<u8>,
    /// Length of the header block within `raw`.
    pub header_size: usize,
}

impl TransportResponse {
    /// Assembles a response from a header block and a body.
    #[must_use]
    pub fn from_parts(status: u16, header_block: &str, body: &[u8]) -> Self {
        let mut raw = Vec::with_capacity(header_block.len() + body.len());
        raw.extend_from_slice(header_block.as_bytes());
        raw.extend_from_slice(body);
        Self {
            status,
            raw,
            header_size: header_block.len(),
        }
    }
}

/// An HTTP transport capable of sending GET, POST, PUT and DELETE requests.
///
/// Implementations own connection management, TLS and redirects. They must
/// report a failure to obtain any response as a [`TransportError`]; a
/// response with an error status is still a successful round trip.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

/// [`Transport`] backed by a `reqwest` client with rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Wraps an existing `reqwest` client, keeping its timeouts and proxies.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut req_builder = self.client.request(method, &request.url);
            for (key, value) in &request.headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(body) = request.body {
                req_builder = req_builder.body(body);
            }

            let res = req_builder.send().await?;
            let status = res.status();

            // Rebuild the header block as it appeared on the wire.
            let mut raw = format!("{:?} {}\r\n", res.version(), status).into_bytes();
            for (name, value) in res.headers() {
                raw.extend_from_slice(name.as_str().as_bytes());
                raw.extend_from_slice(b": ");
                raw.extend_from_slice(value.as_bytes());
                raw.extend_from_slice(b"\r\n");
            }
            raw.extend_from_slice(b"\r\n");
            let header_size = raw.len();

            let body = res.bytes().await?;
            raw.extend_from_slice(&body);

            Ok(TransportResponse {
                status: status.as_u16(),
                raw,
                header_size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_records_header_size() {
        let response = TransportResponse::from_parts(200, "HTTP/1.1 200 OK\r\n\r\n", b"{}");
        assert_eq!(response.header_size, 19);
        assert_eq!(response.raw.len(), 21);
        assert_eq!(&response.raw[response.header_size..], b"{}");
    }

    #[test]
    fn test_request_header_lookup_ignores_case() {
        let request = TransportRequest {
            method: HttpMethod::Get,
            url: "https://api.listex.info/v3/brands".to_string(),
            headers: vec![("If-None-Match".to_string(), "\"x\"".to_string())],
            body: None,
        };
        assert_eq!(request.header("if-none-match"), Some("\"x\""));
        assert!(request.header("Content-Type").is_none());
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestTransport>();
    }
}
