//! Rendering provider and retry behavior against a mock provider

use crate::fixtures::good_page;
use seo_lens::fetch::{build_http_client, HttpRenderProvider, ScrapeOptions};
use seo_lens::{scrape_url, AnalysisRequest, Auditor, RateLimiter, SeoError};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";
const TARGET: &str = "https://example.com/";

fn provider_for(server: &MockServer) -> HttpRenderProvider {
    let endpoint =
        Url::parse(&format!("{}/render", server.uri())).expect("Failed to parse mock endpoint");
    let client = build_http_client().expect("Failed to build client");
    HttpRenderProvider::new(client, endpoint, API_KEY.to_string())
}

/// Short delays so real-time retries stay fast
fn fast_options(max_retries: u32) -> ScrapeOptions {
    ScrapeOptions {
        max_retries,
        retry_delay: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
    }
}

fn target() -> Url {
    Url::parse(TARGET).unwrap()
}

#[tokio::test]
async fn test_successful_render() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .and(query_param("api_key", API_KEY))
        .and(query_param("url", TARGET))
        .and(query_param("render_js", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><title>Hi</title></html>")
                .insert_header("x-render-cost", "5"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = scrape_url(&provider, &target(), &fast_options(3))
        .await
        .expect("render should succeed");

    assert_eq!(result.html, "<html><title>Hi</title></html>");
    assert_eq!(result.metadata.status_code, 200);
    assert_eq!(result.metadata.attempts, 1);
    assert_eq!(result.metadata.url, TARGET);
    assert_eq!(
        result.metadata.headers.get("x-render-cost").map(String::as_str),
        Some("5")
    );
}

#[tokio::test]
async fn test_render_js_flag_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .and(query_param("render_js", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server).with_render_js(false);
    scrape_url(&provider, &target(), &fast_options(1))
        .await
        .expect("render should succeed");
}

#[tokio::test]
async fn test_server_errors_retried_until_success() {
    let mock_server = MockServer::start().await;

    // First two calls fail; the fallback mock answers afterwards
    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>third time</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = scrape_url(&provider, &target(), &fast_options(3))
        .await
        .expect("third attempt should succeed");

    assert_eq!(result.html, "<html>third time</html>");
    assert_eq!(result.metadata.attempts, 3);
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid url parameter"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = scrape_url(&provider, &target(), &fast_options(3))
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 1);
    assert_eq!(err.message, "HTTP 400: Bad Request (invalid url parameter)");
    assert_eq!(SeoError::from(err).http_status(), 500);
}

#[tokio::test]
async fn test_request_timeout_status_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(408).set_body_string("upstream timeout"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = scrape_url(&provider, &target(), &fast_options(3))
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 1);
    assert_eq!(err.message, "HTTP 408: Request Timeout (upstream timeout)");
}

#[tokio::test]
async fn test_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = scrape_url(&provider, &target(), &fast_options(3))
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 3);
    assert_eq!(err.message, "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_rate_limited_provider_maps_to_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = scrape_url(&provider, &target(), &fast_options(2))
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 2);
    assert_eq!(SeoError::from(err).http_status(), 429);
}

#[tokio::test]
async fn test_empty_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = scrape_url(&provider, &target(), &fast_options(3))
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 1);
    assert!(err.message.contains("Empty response"));
}

#[tokio::test]
async fn test_timeout_maps_to_504() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let options = ScrapeOptions {
        timeout: Duration::from_millis(200),
        ..fast_options(1)
    };
    let err = scrape_url(&provider, &target(), &options)
        .await
        .unwrap_err();

    assert_eq!(err.attempts, 1);
    assert!(err.message.to_lowercase().contains("timeout"));
    assert_eq!(SeoError::from(err).http_status(), 504);
}

#[tokio::test]
async fn test_full_audit_through_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .and(query_param("url", TARGET))
        .respond_with(ResponseTemplate::new(200).set_body_string(good_page(r#"rel="nofollow""#)))
        .mount(&mock_server)
        .await;

    let auditor = Auditor::new(
        provider_for(&mock_server),
        fast_options(3),
        RateLimiter::new(1, Duration::from_secs(60)),
    );

    let response = auditor
        .audit(&AnalysisRequest::new("example.com"))
        .await
        .expect("audit should succeed");

    assert!(response.success);
    assert_eq!(response.url, TARGET);
    assert_eq!(response.metadata.attempts, 1);
    assert_eq!(response.results.score, 100);

    // One request per window for this host
    let err = auditor
        .audit(&AnalysisRequest::new(TARGET))
        .await
        .unwrap_err();
    assert!(matches!(err, SeoError::RateLimited(_)));
    assert_eq!(err.http_status(), 429);
}

#[tokio::test]
async fn test_private_target_rejected_before_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let auditor = Auditor::new(
        provider_for(&mock_server),
        fast_options(3),
        RateLimiter::new(10, Duration::from_secs(60)),
    );

    for target in ["http://127.0.0.1/", "http://192.168.1.10/admin", "localhost:8080"] {
        let err = auditor
            .audit(&AnalysisRequest::new(target))
            .await
            .unwrap_err();
        assert!(matches!(err, SeoError::Validation(_)), "{} accepted", target);
        assert_eq!(err.http_status(), 400);
    }
}
