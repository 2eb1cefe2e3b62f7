use crate::config::Config;
use crate::extract::selectors;
use crate::output::Table;
use crate::scrape::{text_of, Fetcher, PageDocument};
use crate::ScrapeError;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub const HEADER: [&str; 3] = ["Link", "Version", "Status"];

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)")
            .expect("version pattern is valid")
    })
}

/// Splits a sidebar link label into version and status
///
/// `"Python 3.11 (stable)"` becomes `("3.11", "stable")`; a label that does
/// not follow that shape is returned whole with an empty status.
pub fn parse_version_label(text: &str) -> (String, String) {
    match version_pattern().captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// Builds the versions table from the documentation home page
pub fn parse_versions(doc: &PageDocument) -> Result<Table, ScrapeError> {
    let mut table = Table::new(HEADER);
    for a in selectors::version_links(doc)? {
        let link = selectors::href_of(a)?;
        let (version, status) = parse_version_label(&text_of(a));
        table.push([link, version, status])?;
    }
    Ok(table)
}

/// Lists every documentation version with its support status
pub async fn latest_versions(
    fetcher: &mut Fetcher,
    config: &Config,
) -> Result<Table, ScrapeError> {
    let url = Url::parse(&config.urls.main_doc_url)?;
    let doc = fetcher.require_document(&url).await?;
    parse_versions(&doc)
}
