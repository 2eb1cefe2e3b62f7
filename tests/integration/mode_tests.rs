use crate::{create_test_config, html};
use pydocs_scraper::{Context, Mode, OutputFormat, ScrapeError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WHATS_NEW_INDEX: &str = r#"<html><body>
<section id="what-s-new-in-python"><h1>What's New in Python</h1>
<div class="toctree-wrapper compound"><ul>
<li class="toctree-l1"><a class="reference internal" href="3.12.html">3.12</a></li>
<li class="toctree-l1"><a class="reference internal" href="3.11.html">3.11</a></li>
<li class="toctree-l1"><a class="reference internal" href="3.10.html">3.10</a></li>
</ul></div>
</section></body></html>"#;

const DOCS_HOME: &str = r#"<html><body>
<div class="sphinxsidebarwrapper">
<ul><li><a href="https://docs.python.org/3/download.html">Download these documents</a></li></ul>
<ul><li>All versions</li>
<li><a href="https://docs.python.org/3.13/">Python 3.13 (in development)</a></li>
<li><a href="https://docs.python.org/3.12/">Python 3.12 (stable)</a></li>
<li><a href="https://docs.python.org/2.7/">Python 2.7</a></li>
</ul>
</div></body></html>"#;

const DOWNLOADS: &str = r#"<html><body>
<div class="body" role="main">
<table class="docutils align-default">
<tr><td>PDF (US-Letter paper size)</td><td><a href="archives/python-docs-pdf-letter.zip">Download</a></td></tr>
<tr><td>PDF (A4 paper size)</td><td><a href="archives/python-docs-pdf-a4.zip">Download</a></td></tr>
</table>
</div></body></html>"#;

const PEP_INDEX: &str = r#"<html><body>
<table class="pep-zero-table docutils">
<thead><tr><th>Type</th><th>PEP</th></tr></thead>
<tbody>
<tr><td><abbr title="Process, Final">PF</abbr></td><td><a class="pep reference internal" href="pep-0001/">1</a></td></tr>
<tr><td>no abbreviation here</td><td><a class="pep reference internal" href="pep-9999/">9999</a></td></tr>
<tr><td><abbr title="Standards Track, Final">SF</abbr></td><td><a class="pep reference internal" href="pep-0008/">8</a></td></tr>
</tbody>
</table></body></html>"#;

fn pep_page(status: &str) -> String {
    format!(
        r#"<html><body><section id="pep-content"><h1>PEP</h1>
<dl class="rfc2822 field-list simple"><dt class="field-odd">Author</dt><dd class="field-odd">Someone</dd>
<dt class="field-even">Status</dt><dd class="field-even">{}</dd></dl>
</section></body></html>"#,
        status
    )
}

fn release_page(version: &str) -> String {
    format!(
        "<html><body><section><h1>What's New In Python {}</h1>\
         <dl class=\"field-list simple\"><dt>Editor</dt>\n<dd>Release Manager</dd></dl>\
         </section></body></html>",
        version
    )
}

#[tokio::test]
async fn test_whats_new_skips_failed_release_pages() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/"))
        .respond_with(html(WHATS_NEW_INDEX))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/3.12.html"))
        .respond_with(html(&release_page("3.12")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/3.11.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    // slower than the client timeout
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/3.10.html"))
        .respond_with(html(&release_page("3.10")).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::new(create_test_config(&mock_server.uri(), dir.path())).unwrap();

    let table = ctx.extract(Mode::WhatsNew, false).await.unwrap().unwrap();

    assert_eq!(table.header(), ["Link", "Title", "Editor/Author"]);
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows()[0],
        vec![
            format!("{}/3/whatsnew/3.12.html", mock_server.uri()),
            "What's New In Python 3.12".to_string(),
            "Editor Release Manager".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_whats_new_fails_when_index_is_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::new(create_test_config(&mock_server.uri(), dir.path())).unwrap();

    let result = ctx.extract(Mode::WhatsNew, false).await;
    assert!(matches!(
        result,
        Err(ScrapeError::PageUnavailable { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_latest_versions_table() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html(DOCS_HOME))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::new(create_test_config(&mock_server.uri(), dir.path())).unwrap();

    let table = ctx.extract(Mode::LatestVersions, false).await.unwrap().unwrap();

    assert_eq!(table.header(), ["Link", "Version", "Status"]);
    let rows: Vec<&[String]> = table.rows().iter().map(Vec::as_slice).collect();
    assert_eq!(
        rows,
        vec![
            ["https://docs.python.org/3.13/", "3.13", "in development"],
            ["https://docs.python.org/3.12/", "3.12", "stable"],
            ["https://docs.python.org/2.7/", "Python 2.7", ""],
        ]
    );
}

#[tokio::test]
async fn test_latest_versions_without_marker_writes_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html(
            r#"<html><body><div class="sphinxsidebarwrapper"><ul><li><a href="x">Other</a></li></ul></div></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());
    let results_dir = config.paths.results_path();
    let mut ctx = Context::new(config).unwrap();

    let result = ctx
        .run(Mode::LatestVersions, Some(OutputFormat::File), false)
        .await;

    assert!(matches!(result, Err(ScrapeError::ListNotFound(_))));
    assert!(!results_dir.exists());
}

#[tokio::test]
async fn test_cached_pages_are_reused_until_cleared() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html(DOCS_HOME))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::new(create_test_config(&mock_server.uri(), dir.path())).unwrap();

    ctx.extract(Mode::LatestVersions, false).await.unwrap();
    ctx.extract(Mode::LatestVersions, false).await.unwrap();
    assert_eq!(ctx.fetcher.stats().hits, 1);

    ctx.extract(Mode::LatestVersions, true).await.unwrap();
    assert_eq!(ctx.fetcher.stats().misses, 2);
}

#[tokio::test]
async fn test_download_saves_archive() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/download.html"))
        .respond_with(html(DOWNLOADS))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-docs-pdf-a4.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04zip".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());
    let archive_path = config.paths.downloads_path().join("python-docs-pdf-a4.zip");
    let mut ctx = Context::new(config).unwrap();

    let table = ctx.extract(Mode::Download, false).await.unwrap();

    assert!(table.is_none());
    assert_eq!(std::fs::read(&archive_path).unwrap(), b"PK\x03\x04zip");
}

#[tokio::test]
async fn test_download_missing_archive_saves_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/download.html"))
        .respond_with(html(DOWNLOADS))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-docs-pdf-a4.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());
    let downloads_dir = config.paths.downloads_path();
    let mut ctx = Context::new(config).unwrap();

    ctx.run(Mode::Download, None, false).await.unwrap();

    assert!(downloads_dir.is_dir());
    assert_eq!(std::fs::read_dir(&downloads_dir).unwrap().count(), 0);
}

async fn mount_pep_site(mock_server: &MockServer, second_status: &str) {
    Mock::given(method("GET"))
        .and(path("/peps/"))
        .respond_with(html(PEP_INDEX))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/peps/pep-0001/"))
        .respond_with(html(&pep_page("Final")))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/peps/pep-0008/"))
        .respond_with(html(&pep_page(second_status)))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_pep_status_summary() {
    let mock_server = MockServer::start().await;
    mount_pep_site(&mock_server, "Final").await;

    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::new(create_test_config(&mock_server.uri(), dir.path())).unwrap();

    let table = ctx.extract(Mode::Pep, false).await.unwrap().unwrap();

    assert_eq!(table.header(), ["Status", "Count"]);
    assert_eq!(
        table.rows(),
        [
            vec!["Final".to_string(), "2".to_string()],
            vec!["Total".to_string(), "2".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_pep_mismatch_is_still_counted() {
    let mock_server = MockServer::start().await;
    mount_pep_site(&mock_server, "Withdrawn").await;

    let dir = tempfile::tempdir().unwrap();
    let mut ctx = Context::new(create_test_config(&mock_server.uri(), dir.path())).unwrap();

    let table = ctx.extract(Mode::Pep, false).await.unwrap().unwrap();

    assert_eq!(
        table.rows(),
        [
            vec!["Final".to_string(), "1".to_string()],
            vec!["Withdrawn".to_string(), "1".to_string()],
            vec!["Total".to_string(), "2".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_pep_report_file() {
    let mock_server = MockServer::start().await;
    mount_pep_site(&mock_server, "Final").await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), dir.path());
    let results_dir = config.paths.results_path();
    let mut ctx = Context::new(config).unwrap();

    ctx.run(Mode::Pep, Some(OutputFormat::File), false)
        .await
        .unwrap();

    let reports: Vec<_> = std::fs::read_dir(&results_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);

    let name = reports[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("pep_"));
    assert!(name.ends_with(".csv"));
    assert_eq!(
        std::fs::read_to_string(&reports[0]).unwrap(),
        "\"Status\",\"Count\"\n\"Final\",\"2\"\n\"Total\",\"2\"\n"
    );
}
