use crate::html;
use pydocs_scraper::cache::{open_cache, ResponseCache};
use pydocs_scraper::config::HttpConfig;
use pydocs_scraper::scrape::{build_http_client, Fetcher};
use pydocs_scraper::ScrapeError;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_fetcher(dir: &tempfile::TempDir, expire_after: Option<chrono::Duration>) -> Fetcher {
    let cache = open_cache(&dir.path().join("http_cache.sqlite")).expect("Failed to open cache");
    let client = build_http_client(&HttpConfig::default()).expect("Failed to build client");
    Fetcher::new(client, cache, expire_after)
}

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html("<html><body>home</body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir, None);
    let url = Url::parse(&format!("{}/3/", mock_server.uri())).unwrap();

    let first = fetcher.fetch(&url).await.unwrap();
    let second = fetcher.fetch(&url).await.unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(first.text, second.text);
    assert_eq!(fetcher.stats().hits, 1);
    assert_eq!(fetcher.stats().misses, 1);
}

#[tokio::test]
async fn test_cache_survives_new_fetcher() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html("<html><body>home</body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let url = Url::parse(&format!("{}/3/", mock_server.uri())).unwrap();

    create_fetcher(&dir, None).fetch(&url).await.unwrap();
    let page = create_fetcher(&dir, None).fetch(&url).await.unwrap();

    assert!(page.from_cache);
}

#[tokio::test]
async fn test_clear_cache_forces_live_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html("<html><body>home</body></html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir, None);
    let url = Url::parse(&format!("{}/3/", mock_server.uri())).unwrap();

    fetcher.fetch(&url).await.unwrap();
    fetcher.clear_cache().unwrap();
    let page = fetcher.fetch(&url).await.unwrap();

    assert!(!page.from_cache);
    assert_eq!(fetcher.stats().hits, 0);
    assert_eq!(fetcher.stats().misses, 2);
}

#[tokio::test]
async fn test_error_status_is_not_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir, None);
    let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();

    let page = fetcher.fetch(&url).await.unwrap();
    assert_eq!(page.status, 404);
    assert!(!page.is_ok());

    fetcher.fetch(&url).await.unwrap();

    let cache = open_cache(&dir.path().join("http_cache.sqlite")).unwrap();
    assert_eq!(cache.len().unwrap(), 0);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html("<html><body>home</body></html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // a negative lifetime makes every stored entry stale
    let mut fetcher = create_fetcher(&dir, Some(chrono::Duration::seconds(-1)));
    let url = Url::parse(&format!("{}/3/", mock_server.uri())).unwrap();

    fetcher.fetch(&url).await.unwrap();
    let page = fetcher.fetch(&url).await.unwrap();

    assert!(!page.from_cache);
}

#[tokio::test]
async fn test_fetch_document_returns_none_on_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir, None);
    let url = Url::parse(&format!("{}/gone", mock_server.uri())).unwrap();

    assert!(fetcher.fetch_document(&url).await.unwrap().is_none());
    assert!(matches!(
        fetcher.require_document(&url).await,
        Err(ScrapeError::PageUnavailable { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_fetch_with_encoding() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x63, 0x61, 0x66, 0xE9]))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir, None);
    let url = Url::parse(&format!("{}/latin1", mock_server.uri())).unwrap();

    let page = fetcher.fetch_with_encoding(&url, "latin1").await.unwrap();
    assert_eq!(page.text, "café");
    assert_eq!(page.bytes, vec![0x63, 0x61, 0x66, 0xE9]);
}

#[tokio::test]
async fn test_transport_failure_carries_url() {
    let dir = tempfile::tempdir().unwrap();
    let mut fetcher = create_fetcher(&dir, None);
    let url = Url::parse("http://127.0.0.1:1/unreachable").unwrap();

    match fetcher.fetch(&url).await {
        Err(ScrapeError::Transport { url: failed, .. }) => {
            assert_eq!(failed, "http://127.0.0.1:1/unreachable");
        }
        other => panic!("expected transport error, got {:?}", other.map(|p| p.status)),
    }
}
