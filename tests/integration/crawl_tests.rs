//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, sitemap file included.

use site_sitemap::config::{CrawlerConfig, SitemapOutput};
use site_sitemap::crawler::{crawl, CrawlProgress, Crawler};
use site_sitemap::state::UrlStatus;
use site_sitemap::CrawlError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing the sitemap to the given path
fn create_test_config(sitemap_path: &Path) -> CrawlerConfig {
    CrawlerConfig {
        sitemap: SitemapOutput::Path(sitemap_path.to_path_buf()),
        probe_timeout_ms: 2_000,
        render_timeout_ms: 2_000,
        ..CrawlerConfig::default()
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn loc_count(xml: &str) -> usize {
    xml.matches("<loc>").count()
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Specific HEAD mocks first; the catch-all HEAD below answers the rest
    Mock::given(method("HEAD"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<a href="/page1">Page 1</a>
               <a href="{}/page2">Page 2</a>
               <a href="http://other.example/x">Elsewhere</a>
               <a href="mailto:owner@example.com">Mail</a>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(
            r#"<a href="/page2">Page 2 again</a><img src="/ignored.png"><a href="/logo.png">Logo</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page(r#"<a href="/">Home</a>"#))
        .mount(&mock_server)
        .await;

    // Non-HTML resources are probed but never downloaded
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let sitemap_path = dir.path().join("sitemap.xml");

    let mut crawler = Crawler::new(&format!("{}/", base_url), create_test_config(&sitemap_path))
        .expect("Failed to create crawler");
    let report = crawler.crawl().await;

    // Should have discovered 4 URLs (/, /page1, /page2, /logo.png)
    assert_eq!(report.urls, 4);
    assert_eq!(report.sitemap, Some(4));

    let keys: Vec<&str> = crawler.state().registry().keys().collect();
    assert_eq!(
        keys,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            format!("{}/logo.png", base_url),
        ]
    );
    assert_eq!(crawler.state().registry().visited_count(), 4);

    let xml = std::fs::read_to_string(&sitemap_path).expect("Sitemap not written");
    assert_eq!(loc_count(&xml), 4);
    assert!(xml.contains(&format!("<loc>{}/page1</loc>", base_url)));
    assert!(xml.contains("<changefreq>weekly</changefreq>"));
    assert!(xml.contains("<priority>0.8</priority>"));
    assert!(!xml.contains("other.example"));
}

#[tokio::test]
async fn test_unreachable_root_still_listed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let sitemap_path = dir.path().join("sitemap.xml");

    // Nothing listens on the discard port
    let report = crawl("http://127.0.0.1:9/", create_test_config(&sitemap_path))
        .await
        .expect("Root is well-formed");

    assert_eq!(report.urls, 1);
    assert_eq!(report.sitemap, Some(1));

    let xml = std::fs::read_to_string(&sitemap_path).expect("Sitemap not written");
    assert!(xml.contains("<loc>http://127.0.0.1:9/</loc>"));
}

#[tokio::test]
async fn test_missing_content_type_skips_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page(r#"<a href="/never">never</a>"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = CrawlerConfig {
        sitemap: SitemapOutput::Disabled,
        ..CrawlerConfig::default()
    };
    let mut crawler = Crawler::new(&mock_server.uri(), config).expect("Failed to create crawler");
    let report = crawler.crawl().await;

    assert_eq!(report.urls, 1);
    assert_eq!(report.sitemap, None);
    assert_eq!(
        crawler
            .state()
            .registry()
            .status(&format!("{}/", mock_server.uri())),
        Some(UrlStatus::Visited)
    );
}

#[tokio::test]
async fn test_progress_reports_every_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/a">a</a><a href="/b">b</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page(""))
        .mount(&mock_server)
        .await;

    let config = CrawlerConfig {
        sitemap: SitemapOutput::Disabled,
        max_concurrency: 2,
        ..CrawlerConfig::default()
    };
    let mut crawler = Crawler::new(&mock_server.uri(), config).expect("Failed to create crawler");
    let mut progress = crawler.progress();

    let report = crawler.crawl().await;

    let mut started = Vec::new();
    let mut finished = None;
    while let Ok(event) = progress.try_recv() {
        match event {
            CrawlProgress::Started { url, .. } => started.push(url),
            CrawlProgress::Finished { urls } => finished = Some(urls),
            CrawlProgress::Visited { .. } => {}
        }
    }

    assert_eq!(report.urls, 3);
    assert_eq!(started.len(), 3);
    assert_eq!(started[0], format!("{}/", mock_server.uri()));
    assert_eq!(finished, Some(3));
}

#[tokio::test]
async fn test_user_agent_override_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(wiremock::matchers::header("user-agent", "Facebot"))
        .respond_with(html_page(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = CrawlerConfig {
        sitemap: SitemapOutput::Disabled,
        user_agent: Some("Facebot".to_string()),
        ..CrawlerConfig::default()
    };

    let report = crawl(&mock_server.uri(), config)
        .await
        .expect("Crawl failed to start");
    assert_eq!(report.urls, 1);
}

#[tokio::test]
async fn test_malformed_root_fails_before_crawling() {
    let result = crawl("example.com/no-scheme", CrawlerConfig::default()).await;
    assert!(matches!(result, Err(CrawlError::Url(_))));
}
