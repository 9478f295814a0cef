//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, extract and CSV-write cycle end-to-end.

use std::path::Path;
use std::time::Duration;
use topic_harvester::config::{
    Config, CrawlerConfig, ExtractionConfig, OutputConfig, ScopeConfig, UserAgentConfig,
};
use topic_harvester::crawler::{build_http_client, fetch_url, run_crawl, FetchResult};
use topic_harvester::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the mock server
fn create_test_config(base_url: &str, seed_path: &str, csv_path: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: base_url.to_string(),
            seed_url: format!("{}{}", base_url, seed_path),
            politeness_delay: 0,
            request_timeout: 5,
        },
        scope: ScopeConfig::default(),
        extraction: ExtractionConfig::default(),
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        output: OutputConfig {
            csv_path: csv_path.to_string_lossy().into_owned(),
        },
    }
}

/// Mounts an HTML page that must be requested exactly once
async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn html_page(title: &str, links: &[&str], body: &str) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<li><a href="{}">{}</a></li>"#, l, l))
        .collect();
    format!(
        r#"<html><head><title>{}</title></head><body>
        <header>Site header</header>
        <nav><ul>{}</ul></nav>
        <div class="content">{}</div>
        <footer>Footer text</footer>
        </body></html>"#,
        title, anchors, body
    )
}

/// Reads the CSV back as (header, rows)
fn read_csv(csv_path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(csv_path).expect("Failed to open CSV");
    let header = reader
        .headers()
        .expect("Missing header")
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = reader
        .records()
        .map(|r| {
            r.expect("Malformed row")
                .iter()
                .map(|f| f.to_string())
                .collect()
        })
        .collect();
    (header, rows)
}

#[tokio::test]
async fn test_full_crawl_writes_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/en-ca/home/topics",
        html_page(
            "Health Topics",
            &[
                "/en-ca/home/heart",
                "/en-ca/home/lungs",
                "/en-ca/home/professional/heart",
                "/en-ca/home/about-us",
                "/en-us/home/heart",
                "/en-ca/home/topics",
            ],
            "<p>Browse topics</p>",
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/en-ca/home/heart",
        html_page(
            "Heart",
            &["/en-ca/home/topics", "/en-ca/home/lungs"],
            "<p>The heart\npumps blood.</p><script>trackPageView();</script>",
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/en-ca/home/lungs",
        html_page("Lungs, \"Airways\"", &["/en-ca/home/heart"], "<p>Lungs exchange gases.</p>"),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    let config = create_test_config(&base_url, "/en-ca/home/topics", &csv_path);

    let summary = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.pages_harvested, 3);
    assert_eq!(summary.total_failures(), 0);
    assert!(summary.finished_at.is_some());

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, vec!["Title", "URL", "Content"]);
    assert_eq!(rows.len(), 3);

    // Seed is recorded before anything it links to
    assert_eq!(rows[0][0], "Health Topics");
    assert_eq!(rows[0][1], format!("{}/en-ca/home/topics", base_url));
    assert_eq!(rows[0][2], "Browse topics");

    let heart = rows.iter().find(|r| r[0] == "Heart").expect("Heart row");
    assert_eq!(heart[2], "The heart pumps blood.");

    let lungs = rows
        .iter()
        .find(|r| r[1].ends_with("/en-ca/home/lungs"))
        .expect("Lungs row");
    assert_eq!(lungs[0], "Lungs, \"Airways\"");

    for row in &rows {
        assert!(!row[1].is_empty());
        assert!(!row[2].contains('\n'));
        assert!(!row[2].contains("Site header"));
        assert!(!row[2].contains("Footer text"));
        assert!(!row[2].contains("/en-ca/home/"));
    }

    // Each mounted page asserts it was fetched exactly once when the server drops
}

#[tokio::test]
async fn test_failing_seed_leaves_header_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/en-ca/home/topics"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    let config = create_test_config(&base_url, "/en-ca/home/topics", &csv_path);

    let summary = run_crawl(&config).await.expect("Crawl should not fail");

    assert_eq!(summary.pages_visited, 1);
    assert_eq!(summary.pages_harvested, 0);
    assert_eq!(summary.http_failures, 1);

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, vec!["Title", "URL", "Content"]);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_leaves_header_only() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");

    // Nothing listens on port 1
    let config = create_test_config("http://127.0.0.1:1", "/en-ca/home/topics", &csv_path);

    let summary = run_crawl(&config).await.expect("Crawl should not fail");
    assert_eq!(summary.network_failures, 1);

    let content = std::fs::read_to_string(&csv_path).expect("CSV missing");
    assert_eq!(content, "Title,URL,Content\n");
}

#[tokio::test]
async fn test_broken_child_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/en-ca/home/topics",
        html_page(
            "Topics",
            &["/en-ca/home/gone", "/en-ca/home/skin"],
            "<p>Index</p>",
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/en-ca/home/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/en-ca/home/skin",
        html_page("Skin", &["/en-ca/home/gone"], "<p>Skin care.</p>"),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    let config = create_test_config(&base_url, "/en-ca/home/topics", &csv_path);

    let summary = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.pages_harvested, 2);
    assert_eq!(summary.http_failures, 1);

    let (_, rows) = read_csv(&csv_path);
    let titles: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(titles, vec!["Topics", "Skin"]);
}

#[tokio::test]
async fn test_empty_body_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/en-ca/home/topics",
        html_page("Topics", &["/en-ca/home/blank"], "<p>Index</p>"),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/en-ca/home/blank"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    let config = create_test_config(&base_url, "/en-ca/home/topics", &csv_path);

    let summary = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(summary.pages_visited, 2);
    assert_eq!(summary.pages_harvested, 1);
    assert_eq!(summary.empty_pages, 1);

    let (_, rows) = read_csv(&csv_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Topics");
}

#[tokio::test]
async fn test_redirect_records_requested_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/en-ca/home/old-topic"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/en-ca/home/new-topic"))
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/en-ca/home/new-topic",
        html_page("New Topic", &[], "<p>Moved here.</p>"),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    let config = create_test_config(&base_url, "/en-ca/home/old-topic", &csv_path);

    run_crawl(&config).await.expect("Crawl failed");

    let (_, rows) = read_csv(&csv_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "New Topic");
    assert_eq!(rows[0][1], format!("{}/en-ca/home/old-topic", base_url));
}

#[tokio::test]
async fn test_rerun_truncates_previous_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/en-ca/home/topics"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page("Topics", &[], "<p>Index</p>"))
                .insert_header("content-type", "text/html"),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    std::fs::write(&csv_path, "old,stale,row\n").expect("Failed to seed file");

    let config = create_test_config(&base_url, "/en-ca/home/topics", &csv_path);
    run_crawl(&config).await.expect("First crawl failed");
    run_crawl(&config).await.expect("Second crawl failed");

    let (header, rows) = read_csv(&csv_path);
    assert_eq!(header, vec!["Title", "URL", "Content"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Topics");
}

#[tokio::test]
async fn test_invalid_config_rejected_before_crawling() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");

    let mut config = create_test_config("http://127.0.0.1:1", "/en-ca/home/topics", &csv_path);
    config.extraction.content_selector = "div[".to_string();

    let result = run_crawl(&config).await;
    assert!(matches!(result, Err(HarvestError::Config(_))));
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("missing-dir").join("harvest.csv");

    let config = create_test_config("http://127.0.0.1:1", "/en-ca/home/topics", &csv_path);

    let result = run_crawl(&config).await;
    assert!(matches!(result, Err(HarvestError::Output(_))));
}

#[tokio::test]
async fn test_fetch_classifies_responses() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("Failed to build client");

    match fetch_url(&client, &format!("{}/ok", base_url)).await {
        FetchResult::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "<html>hi</html>");
        }
        other => panic!("expected success, got {:?}", other),
    }

    assert!(matches!(
        fetch_url(&client, &format!("{}/broken", base_url)).await,
        FetchResult::HttpError { status_code: 500 }
    ));

    // Unmatched paths fall through to wiremock's 404
    assert!(matches!(
        fetch_url(&client, &format!("{}/missing", base_url)).await,
        FetchResult::HttpError { status_code: 404 }
    ));
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en-ca/home/topics"))
        .and(wiremock::matchers::header("user-agent", "TestBot/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Topics", &[], "")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("harvest.csv");
    let config = create_test_config(&mock_server.uri(), "/en-ca/home/topics", &csv_path);

    let summary = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(summary.pages_harvested, 1);
}
