//! Parsed pages and fragment lookups
//!
//! Lookups search the descendants of a node in document order and return the
//! first element whose tag name and attributes match. A missing required
//! fragment is an error naming the tag and filter, never a silent skip.

use crate::ScrapeError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// In-memory parse of one fetched page
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    /// The document's `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// How one attribute value is matched
#[derive(Debug, Clone)]
enum AttrMatch {
    /// Whole value equality; for `class`, equality with any single class also matches
    Exact(String),
    /// Regex search anywhere in the value
    Pattern(Regex),
}

impl AttrMatch {
    fn matches(&self, name: &str, value: &str) -> bool {
        match self {
            Self::Exact(expected) => {
                value == expected
                    || (name == "class" && value.split_whitespace().any(|c| c == expected))
            }
            Self::Pattern(re) => re.is_match(value),
        }
    }
}

/// Set of attribute constraints, all of which must hold
#[derive(Debug, Clone, Default)]
pub struct AttrFilter {
    attrs: Vec<(String, AttrMatch)>,
}

impl AttrFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push((name.to_string(), AttrMatch::Exact(value.to_string())));
        self
    }

    pub fn pattern(mut self, name: &str, pattern: Regex) -> Self {
        self.attrs.push((name.to_string(), AttrMatch::Pattern(pattern)));
        self
    }

    fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.attrs.iter().all(|(name, matcher)| {
            element
                .value()
                .attr(name)
                .map(|value| matcher.matches(name, value))
                .unwrap_or(false)
        })
    }
}

impl fmt::Display for AttrFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, matcher)) in self.attrs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match matcher {
                AttrMatch::Exact(value) => write!(f, "{}={:?}", name, value)?,
                AttrMatch::Pattern(re) => write!(f, "{}~/{}/", name, re.as_str())?,
            }
        }
        write!(f, "}}")
    }
}

/// Iterates every matching descendant of `node` in document order
fn matching<'a, 'f>(
    node: ElementRef<'a>,
    tag: &'f str,
    filter: &'f AttrFilter,
) -> impl Iterator<Item = ElementRef<'a>> + 'f
where
    'a: 'f,
{
    node.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag && filter.matches(el))
}

/// Returns the first descendant of `node` named `tag` that satisfies `filter`
///
/// # Example
///
/// ```
/// use pydocs_scraper::scrape::{locate, AttrFilter, PageDocument};
///
/// let doc = PageDocument::parse(r#"<div role="main"><table class="docutils"></table></div>"#);
/// let main = locate(doc.root(), "div", &AttrFilter::new().exact("role", "main")).unwrap();
/// assert!(locate(main, "table", &AttrFilter::new().exact("class", "docutils")).is_ok());
/// ```
pub fn locate<'a>(
    node: ElementRef<'a>,
    tag: &str,
    filter: &AttrFilter,
) -> Result<ElementRef<'a>, ScrapeError> {
    matching(node, tag, filter)
        .next()
        .ok_or_else(|| ScrapeError::FragmentNotFound {
            tag: tag.to_string(),
            filter: filter.to_string(),
        })
}

/// Returns every descendant of `node` named `tag` that satisfies `filter`
pub fn locate_all<'a>(node: ElementRef<'a>, tag: &str, filter: &AttrFilter) -> Vec<ElementRef<'a>> {
    matching(node, tag, filter).collect()
}

/// Runs a CSS selector under `node`
pub fn select<'a>(node: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = Selector::parse(css)
        .map_err(|e| ScrapeError::InvalidSelector(format!("{} ({:?})", css, e)))?;
    Ok(node.select(&selector).collect())
}

/// Returns the `dd` directly following the first `dt` whose text contains `term`
pub fn definition_for<'a>(dl: ElementRef<'a>, term: &str) -> Result<ElementRef<'a>, ScrapeError> {
    for dt in matching(dl, "dt", &AttrFilter::new()) {
        if !text_of(dt).contains(term) {
            continue;
        }
        let next = dt.next_siblings().filter_map(ElementRef::wrap).next();
        if let Some(dd) = next.filter(|el| el.value().name() == "dd") {
            return Ok(dd);
        }
    }

    Err(ScrapeError::FragmentNotFound {
        tag: "dd".to_string(),
        filter: format!("{{after dt containing {:?}}}", term),
    })
}

/// Concatenated text of an element and its descendants
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
