use std::time::Duration;

use docscrape_engine::{ApiFailure, ApiSettings, CrawlerApi, FirecrawlClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FirecrawlClient {
    let settings = ApiSettings {
        api_url: server.uri(),
        ..ApiSettings::default()
    };
    FirecrawlClient::new(settings).expect("client builds")
}

#[tokio::test]
async fn map_site_returns_link_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "url": "https://example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://example.com/a", "https://example.com/b"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let urls = client
        .map_site("https://example.com", "test-key")
        .await
        .expect("map ok");
    assert_eq!(
        urls,
        vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string()
        ]
    );
}

#[tokio::test]
async fn map_site_reports_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Payment Required"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .map_site("https://example.com", "test-key")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::MalformedResponse);
}

#[tokio::test]
async fn map_site_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .map_site("https://example.com", "bad-key")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::HttpStatus(401));
}

#[tokio::test]
async fn map_site_rejects_invalid_base_url() {
    let client = FirecrawlClient::new(ApiSettings::default()).expect("client builds");
    let err = client.map_site("not a url", "test-key").await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::InvalidUrl);
}

#[tokio::test]
async fn scrape_page_returns_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "url": "https://example.com/a",
            "formats": ["markdown"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "markdown": "# Hello\n\nWorld" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let markdown = client
        .scrape_page("https://example.com/a", "test-key")
        .await
        .expect("scrape ok");
    assert_eq!(markdown, "# Hello\n\nWorld");
}

#[tokio::test]
async fn scrape_page_reports_missing_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .scrape_page("https://example.com/a", "test-key")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::MalformedResponse);
}

#[tokio::test]
async fn scrape_page_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "success": true, "data": { "markdown": "slow" } })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        api_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    };
    let client = FirecrawlClient::new(settings).expect("client builds");
    let err = client
        .scrape_page("https://example.com/a", "test-key")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiFailure::Timeout);
}
