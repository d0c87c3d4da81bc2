//! Response types for the Listex API client.
//!
//! This module turns the raw bytes handed back by a transport into a
//! [`RawResponse`] and exposes the header-derived values the Listex API
//! reports: the entity tag, the usage quota and the retry delay.

use std::borrow::Cow;
use std::collections::HashMap;

/// Normalized name of the entity tag header.
pub const ETAG_HEADER: &str = "ETag";

/// Normalized name of the `API-Usage-Limit` header.
pub const USAGE_LIMIT_HEADER: &str = "APIUsageLimit";

/// Normalized name of the `Retry-After` header.
pub const RETRY_AFTER_HEADER: &str = "RetryAfter";

/// Usage quota parsed from the `API-Usage-Limit` header.
///
/// The header format is "X/Y" where X is the number of requests used in the
/// current window and Y is the number allowed.
///
/// # Example
///
/// ```rust
/// use listex_api::clients::UsageLimit;
///
/// let limit = UsageLimit::parse("5/100").unwrap();
/// assert_eq!(limit.current, 5);
/// assert_eq!(limit.limit, 100);
/// assert!(UsageLimit::parse("100").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsageLimit {
    /// Requests used so far in the current window.
    pub current: u64,
    /// Requests allowed in the current window.
    pub limit: u64,
}

impl UsageLimit {
    /// Parses the usage limit header value.
    ///
    /// Returns `None` if the value has no `/` or either side is not a number.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (current, limit) = header_value.split_once('/')?;
        Some(Self {
            current: current.trim().parse().ok()?,
            limit: limit.trim().parse().ok()?,
        })
    }

    /// Returns the number of requests left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.current)
    }
}

/// Parses a raw header block into a map.
///
/// The block is split on CRLF. Lines without a colon (the status line, the
/// blank terminator) are skipped. The key is the text before the first
/// colon with every hyphen removed; the value is the rest of the line with
/// spaces, tabs and quote characters trimmed from both ends. A repeated
/// header keeps its last value.
///
/// # Example
///
/// ```rust
/// use listex_api::clients::parse_headers;
///
/// let headers = parse_headers("HTTP/1.1 200 OK\r\nETag: \"abc123\"\r\nRetry-After: 30\r\n\r\n");
/// assert_eq!(headers["ETag"], "abc123");
/// assert_eq!(headers["RetryAfter"], "30");
/// ```
#[must_use]
pub fn parse_headers(block: &str) -> HashMap<String, String> {
    block
        .split("\r\n")
        .filter_map(|line| {
            let (key, _) = line.split_once(':')?;
            let value = line
                .replacen(&format!("{key}:"), "", 1)
                .trim_matches(|c| matches!(c, ' ' | '\t' | '"' | '\''))
                .to_string();
            Some((key.replace('-', ""), value))
        })
        .collect()
}

/// Splits a raw transport payload into its header block and body.
///
/// The body bytes are returned untouched. It is empty when the payload ends
/// exactly at `header_size`. A header size beyond the payload is clamped to
/// the payload length.
#[must_use]
pub fn split_raw(raw: &[u8], header_size: usize) -> (String, Vec<u8>) {
    let header_size = header_size.min(raw.len());
    let (header, body) = raw.split_at(header_size);
    (String::from_utf8_lossy(header).into_owned(), body.to_vec())
}

/// A response received from the Listex API.
///
/// Returned by every request so header-derived values can be read without
/// consulting shared client state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code, or 0 when no response has been received.
    pub status: u16,
    /// Response headers, keyed by name with hyphens removed.
    pub headers: HashMap<String, String>,
    /// The response body, exactly as received.
    ///
    /// Listex serves XML in legacy charsets as well as JSON, so no decoding
    /// is applied. Use [`text`](Self::text) for a UTF-8 view.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from a parsed header map.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Creates a response from a transport's raw payload.
    #[must_use]
    pub fn from_raw(status: u16, raw: &[u8], header_size: usize) -> Self {
        let (header, body) = split_raw(raw, header_size);
        Self::new(status, parse_headers(&header), body)
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns a header value.
    ///
    /// `name` is normalized the same way stored keys are (hyphens removed).
    /// An exact match wins; otherwise the lookup ignores ASCII case, since
    /// HTTP/2 transports report header names in lower case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.replace('-', "");
        self.headers
            .get(&name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(&name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    /// Returns the entity tag of the response, if present.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.header(ETAG_HEADER)
    }

    /// Returns the usage quota reported by the server, if present.
    #[must_use]
    pub fn usage(&self) -> Option<UsageLimit> {
        self.header(USAGE_LIMIT_HEADER).and_then(UsageLimit::parse)
    }

    /// Returns the number of requests used in the current window.
    #[must_use]
    pub fn current_usage_count(&self) -> Option<u64> {
        self.usage().map(|limit| limit.current)
    }

    /// Returns the number of requests allowed in the current window.
    #[must_use]
    pub fn usage_limit(&self) -> Option<u64> {
        self.usage().map(|limit| limit.limit)
    }

    /// Returns the seconds to wait before access is granted again.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.header(RETRY_AFTER_HEADER)
            .and_then(|value| value.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ETag: \"abc123\"\r\nAPIUsageLimit: 5/100\r\nRetryAfter: 30\r\n\r\n";

    #[test]
    fn test_parse_headers_trims_quotes_and_whitespace() {
        let headers = parse_headers(SAMPLE);

        assert_eq!(headers.len(), 3);
        assert_eq!(headers["ETag"], "abc123");
        assert_eq!(headers["APIUsageLimit"], "5/100");
        assert_eq!(headers["RetryAfter"], "30");
    }

    #[test]
    fn test_parse_headers_strips_hyphens_from_keys() {
        let headers = parse_headers("API-Usage-Limit: 1/10\r\nContent-Type: text/xml\r\n");

        assert_eq!(headers["APIUsageLimit"], "1/10");
        assert_eq!(headers["ContentType"], "text/xml");
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_parse_headers_skips_lines_without_colon() {
        let headers = parse_headers("HTTP/1.1 304 Not Modified\r\n\r\nnot a header\r\n");
        assert!(headers.is_empty());
    }

    #[test]
    fn test_parse_headers_keeps_colons_inside_values() {
        let headers = parse_headers("Location: https://api.listex.info/v3/product\r\n");
        assert_eq!(headers["Location"], "https://api.listex.info/v3/product");
    }

    #[test]
    fn test_parse_headers_last_duplicate_wins() {
        let headers = parse_headers("Set-Cookie: a=1\r\nSet-Cookie: b=2\r\n");
        assert_eq!(headers["SetCookie"], "b=2");
    }

    #[test]
    fn test_parse_headers_trims_tabs_and_single_quotes() {
        let headers = parse_headers("X-Note:\t'quoted'\t\r\n");
        assert_eq!(headers["XNote"], "quoted");
    }

    #[test]
    fn test_usage_limit_parsing() {
        let limit = UsageLimit::parse("5/100").unwrap();
        assert_eq!(limit.current, 5);
        assert_eq!(limit.limit, 100);
        assert_eq!(limit.remaining(), 95);

        assert!(UsageLimit::parse("100").is_none());
        assert!(UsageLimit::parse("").is_none());
        assert!(UsageLimit::parse("/100").is_none());
        assert!(UsageLimit::parse("a/b").is_none());
    }

    #[test]
    fn test_split_raw_separates_body() {
        let raw = b"HTTP/1.1 200 OK\r\nETag: x\r\n\r\n{\"id\":1}";
        let header_size = raw.len() - "{\"id\":1}".len();

        let (header, body) = split_raw(raw, header_size);
        assert!(header.ends_with("\r\n\r\n"));
        assert_eq!(body, b"{\"id\":1}");
    }

    #[test]
    fn test_split_raw_empty_body_when_sizes_match() {
        let raw = b"HTTP/1.1 304 Not Modified\r\n\r\n";
        let (_, body) = split_raw(raw, raw.len());
        assert!(body.is_empty());

        let (header, body) = split_raw(raw, raw.len() + 10);
        assert_eq!(header.len(), raw.len());
        assert!(body.is_empty());
    }

    #[test]
    fn test_body_bytes_are_kept_verbatim() {
        // "Помилка" in windows-1251
        let body = [0xCF, 0xEE, 0xEC, 0xE8, 0xEB, 0xEA, 0xE0];
        let mut raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/xml; charset=windows-1251\r\n\r\n".to_vec();
        let header_size = raw.len();
        raw.extend_from_slice(&body);

        let response = RawResponse::from_raw(200, &raw, header_size);
        assert_eq!(response.body, body);
        assert!(response.text().contains('\u{FFFD}'));
    }

    #[test]
    fn test_accessors_read_known_headers() {
        let response = RawResponse::new(200, parse_headers(SAMPLE), "");

        assert_eq!(response.etag(), Some("abc123"));
        assert_eq!(response.current_usage_count(), Some(5));
        assert_eq!(response.usage_limit(), Some(100));
        assert_eq!(response.retry_after(), Some(30));
    }

    #[test]
    fn test_accessors_absent_without_headers() {
        let response = RawResponse::default();

        assert_eq!(response.status, 0);
        assert!(response.etag().is_none());
        assert!(response.usage().is_none());
        assert!(response.current_usage_count().is_none());
        assert!(response.usage_limit().is_none());
        assert!(response.retry_after().is_none());
    }

    #[test]
    fn test_usage_accessors_absent_without_separator() {
        let response = RawResponse::new(200, parse_headers("API-Usage-Limit: 100\r\n"), "");
        assert!(response.current_usage_count().is_none());
        assert!(response.usage_limit().is_none());
    }

    #[test]
    fn test_header_lookup_falls_back_to_case_insensitive() {
        let response = RawResponse::new(
            200,
            parse_headers("etag: \"w1\"\r\napi-usage-limit: 7/50\r\n"),
            "",
        );

        assert_eq!(response.etag(), Some("w1"));
        assert_eq!(response.current_usage_count(), Some(7));
        assert_eq!(response.header("API-Usage-Limit"), Some("7/50"));
    }

    #[test]
    fn test_from_raw_parses_headers_and_body() {
        let raw = b"HTTP/1.1 200 OK\r\nETag: \"e1\"\r\n\r\n<xml/>";
        let response = RawResponse::from_raw(200, raw, raw.len() - 6);

        assert_eq!(response.status, 200);
        assert_eq!(response.etag(), Some("e1"));
        assert_eq!(response.body, b"<xml/>");
        assert_eq!(response.text(), "<xml/>");
    }
}
