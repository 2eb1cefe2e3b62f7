//! Markup of docs.python.org and peps.python.org
//!
//! Every tag name, attribute filter and CSS selector the extractors rely on
//! lives here, so a change in the sites' markup is fixed in one file.

use crate::scrape::{
    definition_for, locate, locate_all, select, text_of, AttrFilter, PageDocument,
};
use crate::ScrapeError;
use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

/// Release notes index, relative to the documentation root
pub const WHATS_NEW_PATH: &str = "whatsnew/";

/// Downloads page, relative to the documentation root
pub const DOWNLOAD_PATH: &str = "download.html";

/// Text identifying the sidebar list of documentation versions
pub const ALL_VERSIONS_MARKER: &str = "All versions";

const PEP_ROWS_CSS: &str = "table.pep-zero-table tbody tr";

fn archive_href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".+pdf-a4\.zip$").expect("archive pattern is valid"))
}

/// `href` of a link element; a link without one is treated as missing markup
pub fn href_of(a: ElementRef<'_>) -> Result<String, ScrapeError> {
    a.value()
        .attr("href")
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::FragmentNotFound {
            tag: "a".to_string(),
            filter: "{href}".to_string(),
        })
}

/// One `li` per Python minor version on the release notes index
pub fn release_entries(doc: &PageDocument) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
    let section = locate(
        doc.root(),
        "section",
        &AttrFilter::new().exact("id", "what-s-new-in-python"),
    )?;
    let wrapper = locate(
        section,
        "div",
        &AttrFilter::new().exact("class", "toctree-wrapper"),
    )?;
    Ok(locate_all(
        wrapper,
        "li",
        &AttrFilter::new().exact("class", "toctree-l1"),
    ))
}

/// First link inside a release notes entry
pub fn release_entry_link(entry: ElementRef<'_>) -> Result<String, ScrapeError> {
    href_of(locate(entry, "a", &AttrFilter::new())?)
}

/// Title of a release notes page
pub fn release_title<'a>(doc: &'a PageDocument) -> Result<ElementRef<'a>, ScrapeError> {
    locate(doc.root(), "h1", &AttrFilter::new())
}

/// Editor/author definition list of a release notes page
pub fn release_authors<'a>(doc: &'a PageDocument) -> Result<ElementRef<'a>, ScrapeError> {
    locate(doc.root(), "dl", &AttrFilter::new())
}

/// Links of the sidebar list containing [`ALL_VERSIONS_MARKER`]
///
/// Fails with `ListNotFound` when no sidebar list carries the marker.
pub fn version_links(doc: &PageDocument) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
    let sidebar = locate(
        doc.root(),
        "div",
        &AttrFilter::new().exact("class", "sphinxsidebarwrapper"),
    )?;

    locate_all(sidebar, "ul", &AttrFilter::new())
        .into_iter()
        .find(|ul| text_of(*ul).contains(ALL_VERSIONS_MARKER))
        .map(|ul| locate_all(ul, "a", &AttrFilter::new()))
        .ok_or_else(|| {
            ScrapeError::ListNotFound(format!(
                "no sidebar list contains {:?}",
                ALL_VERSIONS_MARKER
            ))
        })
}

/// Link to the A4 PDF documentation archive on the downloads page
pub fn archive_link(doc: &PageDocument) -> Result<ElementRef<'_>, ScrapeError> {
    let main = locate(doc.root(), "div", &AttrFilter::new().exact("role", "main"))?;
    let table = locate(main, "table", &AttrFilter::new().exact("class", "docutils"))?;
    locate(
        table,
        "a",
        &AttrFilter::new().pattern("href", archive_href_pattern().clone()),
    )
}

/// Rows of the PEP index status tables
pub fn pep_rows(doc: &PageDocument) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
    select(doc.root(), PEP_ROWS_CSS)
}

/// Type/status abbreviation cell of a PEP index row, if the row has one
pub fn pep_abbreviation(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    locate(row, "abbr", &AttrFilter::new()).ok()
}

/// Link from a PEP index row to the PEP itself
pub fn pep_link(row: ElementRef<'_>) -> Result<String, ScrapeError> {
    href_of(locate(
        row,
        "a",
        &AttrFilter::new().exact("class", "pep reference internal"),
    )?)
}

/// Status value in the header field list of a PEP page
pub fn pep_status<'a>(doc: &'a PageDocument) -> Result<ElementRef<'a>, ScrapeError> {
    let content = locate(
        doc.root(),
        "section",
        &AttrFilter::new().exact("id", "pep-content"),
    )?;
    let fields = locate(
        content,
        "dl",
        &AttrFilter::new().exact("class", "rfc2822 field-list simple"),
    )?;
    definition_for(fields, "Status")
}
