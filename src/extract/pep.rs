use crate::config::Config;
use crate::extract::{selectors, status};
use crate::output::Table;
use crate::progress::progress_bar;
use crate::scrape::{text_of, Fetcher, PageDocument};
use crate::ScrapeError;
use indexmap::IndexMap;
use url::Url;

pub const HEADER: [&str; 2] = ["Status", "Count"];

/// One row of the PEP index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepIndexEntry {
    /// Status letter from the index; empty for drafts and active PEPs
    pub code: String,
    /// Link to the PEP page, relative to the index
    pub href: String,
}

/// Reads status code and link from every marked row of the PEP index
///
/// Rows without an abbreviation cell are not PEP entries and are skipped.
pub fn parse_pep_index(doc: &PageDocument) -> Result<Vec<PepIndexEntry>, ScrapeError> {
    let rows = selectors::pep_rows(doc)?;
    let bar = progress_bar(rows.len() as u64, "PEP index");
    let mut entries = Vec::new();

    for row in rows {
        bar.inc(1);
        let Some(abbr) = selectors::pep_abbreviation(row) else {
            continue;
        };
        // first letter is the PEP type, the rest is the status
        let code: String = text_of(abbr).chars().skip(1).collect();
        let href = selectors::pep_link(row)?;
        entries.push(PepIndexEntry { code, href });
    }

    bar.finish_and_clear();
    Ok(entries)
}

/// Status shown in the header of a PEP page
pub fn parse_pep_status(doc: &PageDocument) -> Result<String, ScrapeError> {
    Ok(text_of(selectors::pep_status(doc)?))
}

/// Counts statuses in first-seen order and appends the total
pub fn summarize_statuses<S: AsRef<str>>(statuses: &[S]) -> Result<Table, ScrapeError> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for status in statuses {
        *counts.entry(status.as_ref()).or_insert(0) += 1;
    }

    let mut table = Table::new(HEADER);
    for (status, count) in counts {
        table.push([status.to_string(), count.to_string()])?;
    }
    table.push(["Total".to_string(), statuses.len().to_string()])?;
    Ok(table)
}

/// Counts PEPs per status as shown on each PEP's own page
///
/// A status that disagrees with the index code is logged and still counted.
pub async fn pep(fetcher: &mut Fetcher, config: &Config) -> Result<Table, ScrapeError> {
    let index_url = Url::parse(&config.urls.pep_index_url)?;

    let entries = {
        let doc = fetcher.require_document(&index_url).await?;
        parse_pep_index(&doc)?
    };

    let bar = progress_bar(entries.len() as u64, "PEP statuses");
    let mut statuses = Vec::with_capacity(entries.len());

    for entry in entries {
        bar.inc(1);
        let pep_url = index_url.join(&entry.href)?;
        let actual = {
            let doc = fetcher.require_document(&pep_url).await?;
            parse_pep_status(&doc)?
        };

        if !status::is_expected(&entry.code, &actual) {
            tracing::info!(
                "Mismatched statuses: {} status on page: {} expected: {:?}",
                pep_url,
                actual,
                status::expected_statuses(&entry.code)
            );
        }
        statuses.push(actual);
    }

    bar.finish_and_clear();
    summarize_statuses(&statuses)
}
