//! Integration tests for `ListexClient` against a mock Listex server.
//!
//! These tests run the full stack (facade, request pipeline and the reqwest
//! transport) and check what arrives on the wire and how responses are
//! classified.

use listex_api::api::{AttributeType, ProductLookup, Review, ReviewTarget, SocialType};
use listex_api::{ApiKey, ApiVersion, BaseUrl, ListexClient, ListexConfig, ListexError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ListexClient {
    let config = ListexConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    ListexClient::new(&config)
}

async fn last_query(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    requests
        .last()
        .and_then(|request| request.url.query().map(String::from))
        .unwrap_or_default()
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn test_product_request_carries_key_format_and_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/product"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("format", "json"))
        .and(query_param("good_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"good_id":42}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .get_product(&ProductLookup::Id(42), None)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), r#"{"good_id":42}"#);
    assert_eq!(client.last_http_code(), 200);
}

#[tokio::test]
async fn test_query_is_sorted_by_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/product"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .get_product(&ProductLookup::Id(42), None)
        .await
        .unwrap();

    assert_eq!(last_query(&server).await, "apikey=test-key&format=json&good_id=42");
}

#[tokio::test]
async fn test_legacy_version_authenticates_with_key_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/brands"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ListexConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_version(ApiVersion::V2)
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = ListexClient::new(&config);

    let response = client.get_brands(None, None).await.unwrap();
    assert_eq!(response.text(), "[]");
    assert!(!last_query(&server).await.contains("apikey"));
}

#[tokio::test]
async fn test_falsy_optional_params_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/attributes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .get_attributes(Some(0), Some(AttributeType::All))
        .await
        .unwrap();

    let query = last_query(&server).await;
    assert!(query.contains("attr_type=a"));
    assert!(!query.contains("cat_id"));
}

#[tokio::test]
async fn test_xml_format_switch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/categories"))
        .and(query_param("format", "xml"))
        .and(header("Accept", "application/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<categories/>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_format_xml();

    let response = client.get_categories(None).await.unwrap();
    assert_eq!(response.text(), "<categories/>");
}

#[tokio::test]
async fn test_review_is_posted_with_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/addreview"))
        .and(query_param("good_id", "42"))
        .and(query_param("review_text", "Very good"))
        .and(query_param("social_type", "gp"))
        .and(query_param("review_rating", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"ok"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let review = Review {
        text: "Very good".to_string(),
        social_type: SocialType::GooglePlus,
        social_id: "1001".to_string(),
        author: "Oksana".to_string(),
        rating: 5,
    };

    let response = client
        .add_review(ReviewTarget::Good(42), &review)
        .await
        .unwrap();
    assert_eq!(response.text(), r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_assortment_update_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v3/assortment"))
        .and(query_param("party_id", "7"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"goods": [{"good_id": 1}]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .update_assortment(7, None, json!({"goods": [{"good_id": 1}]}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_assortment_delete_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v3/assortment"))
        .and(query_param("location_id", "3"))
        .and(body_json(json!({"goods": [5]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .delete_assortment(7, Some(3), Some(json!({"goods": [5]})))
        .await
        .unwrap();
}

// ============================================================================
// Conditional requests
// ============================================================================

#[tokio::test]
async fn test_etag_is_sent_quoted_and_304_is_not_modified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/brands"))
        .and(header("If-None-Match", "\"abc123\""))
        .respond_with(ResponseTemplate::new(304).insert_header("ETag", "\"abc123\""))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_brands(None, Some("abc123")).await;

    match result {
        Err(ListexError::NotModified { code }) => assert_eq!(code, 304),
        other => panic!("expected NotModified, got {other:?}"),
    }
    assert_eq!(client.last_http_code(), 304);
    assert_eq!(client.last_etag().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_etag_and_usage_headers_are_exposed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/product"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"v1\"")
                .insert_header("API-Usage-Limit", "5/100")
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .get_product(&ProductLookup::Gtin("4820000000001".to_string()), None)
        .await
        .unwrap();

    assert_eq!(response.etag(), Some("v1"));
    assert_eq!(client.last_etag().as_deref(), Some("v1"));
    assert_eq!(client.current_usage_count(), Some(5));
    assert_eq!(client.usage_limit(), Some(100));
    assert_eq!(client.last_usage().unwrap().remaining(), 95);
}

// ============================================================================
// Status classification
// ============================================================================

#[tokio::test]
async fn test_not_found_returns_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/suppliers"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"none"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.get_suppliers("12345678").await.unwrap();

    assert_eq!(response.status, 404);
    assert!(response.body.is_empty());
    assert_eq!(client.last_http_code(), 404);
}

#[tokio::test]
async fn test_bad_request_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/novelty-products"))
        .respond_with(ResponseTemplate::new(400).set_body_string("date_from is invalid"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .get_novelty_products("yesterday", None)
        .await
        .unwrap_err();

    assert_eq!(error.code(), Some(400));
    assert_eq!(error.to_string(), "Request error: date_from is invalid");
}

#[tokio::test]
async fn test_bad_request_keeps_non_utf8_body() {
    // "Помилка" in windows-1251
    let body = vec![0xCF, 0xEE, 0xEC, 0xE8, 0xEB, 0xEA, 0xE0];
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/suggestions"))
        .respond_with(ResponseTemplate::new(400).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.get_suggestions("milk").await {
        Err(ListexError::RequestError { code, body: got }) => {
            assert_eq!(code, 400);
            assert_eq!(got, body);
        }
        other => panic!("expected RequestError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_exposes_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/suggestions"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.get_suggestions("milk").await;

    assert!(matches!(
        result,
        Err(ListexError::RequestLimitReached { code: 429 })
    ));
    assert_eq!(client.retry_after(), Some(30));
}

#[tokio::test]
async fn test_status_codes_map_to_error_variants() {
    let cases = [
        (401, "NotAuthorized"),
        (403, "NoAccess"),
        (405, "MethodNotAllowed"),
        (423, "Locked"),
        (500, "InternalServerError"),
        (501, "MethodNotFound"),
        (503, "ServiceNotAvailable"),
        (418, "Unknown"),
    ];

    for (status, variant) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let error = client.get_locations(None).await.unwrap_err();

        assert_eq!(error.code(), Some(status));
        assert!(
            format!("{error:?}").starts_with(variant),
            "{status} mapped to {error:?}"
        );
    }
}

#[tokio::test]
async fn test_repeated_call_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/etagslist"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"list\"")
                .set_body_string("[1,2,3]"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.get_etags_list(9).await.unwrap();
    let second = client.get_etags_list(9).await.unwrap();

    assert_eq!(first.status, second.status);
    assert_eq!(first.body, second.body);
    assert_eq!(first.etag(), second.etag());
    assert_eq!(client.last_etag().as_deref(), Some("list"));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let config = ListexConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new("http://127.0.0.1:1").unwrap())
        .build()
        .unwrap();
    let client = ListexClient::new(&config);

    let result = client.get_categories(None).await;
    assert!(matches!(result, Err(ListexError::Transport(_))));
    assert_eq!(client.last_http_code(), 0);
    assert!(client.last_etag().is_none());
}
