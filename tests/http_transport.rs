//! End-to-end dispatch over the reqwest transport against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use messari_sdk::{
    CallParams, ClientError, EndpointDescriptor, EndpointRegistry, HttpMethod, HttpTransport,
    MessariClient, PageOptions,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MessariClient {
    MessariClient::builder()
        .api_key("it-key")
        .base_url(&format!("{}/", server.uri()))
        .transport(Arc::new(HttpTransport::new().unwrap()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_news_feed_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/v1/news/feed"))
        .and(query_param("assetIds", "bitcoin,ethereum"))
        .and(query_param("limit", "50"))
        .and(query_param("sort", "2"))
        .and(header("x-messari-api-key", "it-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"title": "t"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = CallParams::new().query([
        ("assetIds", json!("bitcoin,ethereum")),
        ("limit", json!(50)),
        ("sort", json!(2)),
        ("bogus", json!("x")),
    ]);
    let data = client.call("news.feed", &params).await.unwrap().unwrap();
    assert_eq!(data["data"][0]["title"], "t");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let query = received[0].url.query().unwrap_or_default();
    assert!(!query.contains("bogus"), "bogus key must be filtered: {query}");
}

#[tokio::test]
async fn test_booleans_sent_as_literals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics/v2/assets"))
        .and(query_param("hasMarketData", "true"))
        .and(query_param("hasNews", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = CallParams::new()
        .query_param("hasMarketData", true)
        .query_param("hasNews", false)
        .query_param("search", serde_json::Value::Null);
    client.call("assets.list", &params).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let query = received[0].url.query().unwrap_or_default();
    assert!(!query.contains("search"), "null values must be dropped: {query}");
}

#[tokio::test]
async fn test_rate_limit_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics/v1/exchanges/binance"))
        .respond_with(ResponseTemplate::new(429).set_body_string(r#"{"error":"rate limited"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = CallParams::new().path_param("exchangeIdentifier", "binance");
    let err = client.call("exchanges.get", &params).await.unwrap_err();

    match err {
        ClientError::RateLimit {
            status, body, url, ..
        } => {
            assert_eq!(status, 429);
            assert_eq!(body, Some(json!({"error": "rate limited"})));
            assert_eq!(url, format!("{}/metrics/v1/exchanges/binance", server.uri()));
        }
        other => panic!("expected RateLimit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.call("assets.details", &CallParams::new()).await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.to_string(), "[403] HTTP 403");
}

#[tokio::test]
async fn test_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let data = client.call("exchanges.list", &CallParams::new()).await.unwrap();
    assert!(data.is_none());
}

#[tokio::test]
async fn test_post_body_and_raw_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/watchlists"))
        .and(body_json(json!({"name": "majors"})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-request-id", "abc")
                .set_body_string("created"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let registry = EndpointRegistry::from_descriptors(vec![EndpointDescriptor::new(
        "watchlists.create",
        HttpMethod::Post,
        "/v1/watchlists",
    )
    .with_body_params(&["name"])])
    .unwrap();

    let client = MessariClient::builder()
        .api_key("it-key")
        .base_url(&server.uri())
        .registry(Arc::new(registry))
        .build()
        .unwrap();

    let raw = client
        .call_raw("watchlists.create", &CallParams::new().body(json!({"name": "majors"})))
        .await
        .unwrap();
    assert_eq!(raw.status, 201);
    assert_eq!(raw.text(), "created");
    assert_eq!(raw.header("X-Request-Id"), Some("abc"));
}

#[tokio::test]
async fn test_paged_call_over_http() {
    let server = MockServer::start().await;
    for page in 0..3 {
        Mock::given(method("GET"))
            .and(path("/news/v1/news/sources"))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": page})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let pages = client
        .paged_call("news.sources", &CallParams::new(), &PageOptions::new("page", 3))
        .await
        .unwrap();
    let seen: Vec<i64> = pages
        .iter()
        .map(|p| p.as_ref().unwrap()["page"].as_i64().unwrap())
        .collect();
    assert_eq!(seen, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_timeout_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = MessariClient::builder()
        .api_key("it-key")
        .base_url(&server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.call("assets.list", &CallParams::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout { .. }), "got {err:?}");
}
