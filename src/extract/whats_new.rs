use crate::config::Config;
use crate::extract::selectors;
use crate::output::Table;
use crate::progress::progress_bar;
use crate::scrape::{text_of, Fetcher, PageDocument};
use crate::ScrapeError;
use url::Url;

pub const HEADER: [&str; 3] = ["Link", "Title", "Editor/Author"];

/// Links of every per-version entry on the release notes index, in order
pub fn parse_release_index(doc: &PageDocument) -> Result<Vec<String>, ScrapeError> {
    selectors::release_entries(doc)?
        .into_iter()
        .map(selectors::release_entry_link)
        .collect()
}

/// Title and editor/author text of one release notes page
///
/// Line breaks inside the author list are collapsed to spaces.
pub fn parse_release_page(doc: &PageDocument) -> Result<(String, String), ScrapeError> {
    let title = text_of(selectors::release_title(doc)?);
    let authors = text_of(selectors::release_authors(doc)?).replace('\n', " ");
    Ok((title, authors))
}

/// Collects title and editors of every "What's New" page
///
/// A release page that cannot be fetched is skipped; the rest of the
/// entries are still processed.
pub async fn whats_new(fetcher: &mut Fetcher, config: &Config) -> Result<Table, ScrapeError> {
    let index_url = Url::parse(&config.urls.main_doc_url)?.join(selectors::WHATS_NEW_PATH)?;

    let hrefs = {
        let doc = fetcher.require_document(&index_url).await?;
        parse_release_index(&doc)?
    };

    let mut table = Table::new(HEADER);
    let bar = progress_bar(hrefs.len() as u64, "Release notes");

    for href in hrefs {
        bar.inc(1);
        let link = index_url.join(&href)?;

        let page = match fetcher.fetch(&link).await {
            Ok(page) if page.is_ok() => page,
            Ok(page) => {
                tracing::warn!("Skipping {}: HTTP {}", link, page.status);
                continue;
            }
            Err(err @ ScrapeError::Transport { .. }) => {
                tracing::warn!("Skipping {}: {}", link, err);
                continue;
            }
            Err(err) => return Err(err),
        };

        let (title, authors) = parse_release_page(&PageDocument::parse(&page.text))?;
        table.push([link.to_string(), title, authors])?;
    }

    bar.finish_and_clear();
    Ok(table)
}
