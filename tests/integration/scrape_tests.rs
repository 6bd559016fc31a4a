//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch → extract → envelope cycle end-to-end.

use serde_json::{json, Value};
use web_scraper::config::{FetcherConfig, ServerConfig, DEFAULT_USER_AGENT};
use web_scraper::scrape::{ExtractionResult, ScrapeRequest, WebScraper};
use web_scraper::server::Server;
use web_scraper::ErrorKind;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_HEADINGS: &str = r#"<html><head><title>Headings</title></head><body>
    <h1>A</h1>
    <p>between</p>
    <h1>B</h1>
</body></html>"#;

fn create_scraper() -> WebScraper {
    let config = FetcherConfig {
        timeout_secs: 5,
        connect_timeout_secs: 2,
        ..FetcherConfig::default()
    };
    WebScraper::from_config(&config).expect("Failed to build scraper")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_headings_envelope() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", TWO_HEADINGS).await;

    let url = format!("{}/", mock_server.uri());
    let envelope = create_scraper()
        .handle(&ScrapeRequest::new(url.clone(), Some("h1".to_string())))
        .await;

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(
        value,
        json!({
            "success": true,
            "data": {
                "url": url,
                "selector": "h1",
                "count": 2,
                "results": [
                    {"text": "A", "html": "A"},
                    {"text": "B", "html": "B"}
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_single_match_returns_inner_html() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/article",
        r#"<html><body><article id="post"><h2>Title</h2><p>Body <em>text</em></p></article></body></html>"#,
    )
    .await;

    let url = format!("{}/article", mock_server.uri());
    let result = create_scraper()
        .scrape(&url, Some("#post"))
        .await
        .expect("Scrape failed");

    assert_eq!(
        result,
        ExtractionResult::SingleMatch {
            url,
            selector: "#post".to_string(),
            text: "TitleBody text".to_string(),
            html: "<h2>Title</h2><p>Body <em>text</em></p>".to_string(),
        }
    );
}

#[tokio::test]
async fn test_no_match_is_success() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", TWO_HEADINGS).await;

    let url = format!("{}/", mock_server.uri());
    let envelope = create_scraper()
        .handle(&ScrapeRequest::new(url, Some("table".to_string())))
        .await;

    assert!(envelope.is_success());
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["data"]["count"], 0);
    assert_eq!(
        value["data"]["message"],
        "No elements found matching the provided selector"
    );
}

#[tokio::test]
async fn test_page_summary() {
    let mock_server = MockServer::start().await;
    let long_text = "z".repeat(1500);
    mount_page(
        &mock_server,
        "/long",
        &format!(
            r#"<html><head><title> Long page </title><meta name="description" content="Lots of text"></head><body>{}</body></html>"#,
            long_text
        ),
    )
    .await;

    let url = format!("{}/long", mock_server.uri());
    let result = create_scraper().scrape(&url, None).await.expect("Scrape failed");

    match result {
        ExtractionResult::PageSummary {
            url: result_url,
            title,
            description,
            body_text,
        } => {
            assert_eq!(result_url, url);
            assert_eq!(title, "Long page");
            assert_eq!(description, "Lots of text");
            assert_eq!(body_text.chars().count(), 1003);
            assert!(body_text.ends_with("..."));
        }
        other => panic!("expected page summary, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_network_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let scraper = create_scraper();

    let err = scraper.scrape(&url, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkError);

    let envelope = scraper.handle(&ScrapeRequest::new(url.clone(), None)).await;
    let message = envelope.error().expect("Expected failure envelope");
    assert!(message.starts_with(&format!("Failed to scrape {}: ", url)));
    assert!(message.contains("404"));
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let err = create_scraper().scrape(&url, None).await.unwrap_err();

    // A single request, no retries
    assert_eq!(err.kind(), ErrorKind::NetworkError);
}

#[tokio::test]
async fn test_invalid_selector_reported_after_fetch() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", TWO_HEADINGS).await;

    let url = format!("{}/", mock_server.uri());
    let envelope = create_scraper()
        .handle(&ScrapeRequest::new(url.clone(), Some("h1[".to_string())))
        .await;

    let message = envelope.error().expect("Expected failure envelope");
    assert!(message.starts_with(&format!("Failed to scrape {}: Invalid selector", url)));
}

#[test]
fn test_default_user_agent_looks_like_a_browser() {
    assert!(DEFAULT_USER_AGENT.starts_with("Mozilla/5.0"));
    assert_eq!(FetcherConfig::default().user_agent, DEFAULT_USER_AGENT);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let user_agent = "Mozilla/5.0 (X11; Linux x86_64) TestBrowser/1.0";
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", user_agent))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>ok</h1>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetcherConfig {
        user_agent: user_agent.to_string(),
        ..FetcherConfig::default()
    };
    let scraper = WebScraper::from_config(&config).expect("Failed to build scraper");

    let url = format!("{}/", mock_server.uri());
    let result = scraper
        .scrape(&url, Some("h1"))
        .await
        .expect("Request without browser user agent was not matched");

    assert!(matches!(result, ExtractionResult::SingleMatch { ref text, .. } if text == "ok"));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", "<html><head><title>Moved</title></head></html>").await;

    let url = format!("{}/old", mock_server.uri());
    let result = create_scraper().scrape(&url, None).await.expect("Scrape failed");

    // The requested URL is echoed back, not the redirect target
    assert_eq!(result.url(), url);
    assert!(matches!(result, ExtractionResult::PageSummary { ref title, .. } if title == "Moved"));
}

#[tokio::test]
async fn test_server_round_trip() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", TWO_HEADINGS).await;

    let url = format!("{}/", mock_server.uri());
    let input = format!(
        "{}\n{}\n",
        json!({"id": 1, "method": "scrape", "params": {"url": url, "selector": "h1"}}),
        json!({"id": 2, "method": "scrape", "params": {"url": "not-a-url"}}),
    );
    let mut output = Vec::new();

    Server::new(create_scraper(), ServerConfig::default())
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("Serve failed");

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["success"], true);
    assert_eq!(responses[0]["result"]["data"]["count"], 2);
    assert_eq!(responses[1]["result"]["success"], false);
    assert!(responses[1]["result"]["error"]
        .as_str()
        .unwrap()
        .contains("Failed to scrape not-a-url"));
}
