use crate::config::Config;
use crate::extract::selectors;
use crate::scrape::{Fetcher, PageDocument};
use crate::ScrapeError;
use std::path::PathBuf;
use url::Url;

/// `href` of the A4 PDF archive on the downloads page
pub fn parse_archive_href(doc: &PageDocument) -> Result<String, ScrapeError> {
    selectors::href_of(selectors::archive_link(doc)?)
}

/// Last path segment of the archive URL
pub fn archive_file_name(url: &Url) -> String {
    url.path().rsplit('/').next().unwrap_or_default().to_string()
}

/// Downloads the A4 PDF documentation archive into the downloads directory
///
/// # Returns
///
/// * `Ok(Some(path))` - The archive was saved at `path`
/// * `Ok(None)` - The archive URL answered with an error status; nothing written
/// * `Err(ScrapeError)` - A fetch, lookup or write failed
pub async fn download(
    fetcher: &mut Fetcher,
    config: &Config,
) -> Result<Option<PathBuf>, ScrapeError> {
    let downloads_url = Url::parse(&config.urls.main_doc_url)?.join(selectors::DOWNLOAD_PATH)?;

    let href = {
        let doc = fetcher.require_document(&downloads_url).await?;
        parse_archive_href(&doc)?
    };
    let archive_url = downloads_url.join(&href)?;

    let downloads_dir = config.paths.downloads_path();
    std::fs::create_dir_all(&downloads_dir)?;
    let archive_path = downloads_dir.join(archive_file_name(&archive_url));

    let archive = fetcher.fetch(&archive_url).await?;
    if !archive.is_ok() {
        tracing::warn!(
            "Archive {} answered with HTTP {}, nothing saved",
            archive_url,
            archive.status
        );
        return Ok(None);
    }

    std::fs::write(&archive_path, &archive.bytes)?;
    tracing::info!("Archive downloaded and saved: {}", archive_path.display());

    Ok(Some(archive_path))
}
