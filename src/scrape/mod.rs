//! Page fetching and fragment location
//!
//! This module contains the two pieces every report mode is built from:
//! - a cached HTTP fetcher that turns transport failures into one error kind
//! - a parsed page type with first-match tag/attribute queries

mod document;
mod fetcher;

pub use document::{
    definition_for, locate, locate_all, select, text_of, AttrFilter, PageDocument,
};
pub use fetcher::{build_http_client, CacheStats, Fetcher, RawPage, DEFAULT_ENCODING};
