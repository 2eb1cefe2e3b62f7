//! Pydocs-Scraper: report generator for the Python documentation and PEP index
//!
//! This crate fetches pages from docs.python.org and peps.python.org through a
//! persisted response cache, pulls fixed fragments out of their markup and
//! turns them into flat tables (release notes, documentation versions, PEP
//! status counts) or a downloaded documentation archive.

pub mod cache;
pub mod config;
pub mod driver;
pub mod extract;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scrape;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load page {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Page {url} answered with HTTP {status}")]
    PageUnavailable { url: String, status: u16 },

    #[error("Tag not found: {tag} {filter}")]
    FragmentNotFound { tag: String, filter: String },

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("Row has {found} columns, header has {expected}")]
    RowArity { expected: usize, found: usize },

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use driver::Context;
pub use extract::Mode;
pub use output::{OutputFormat, Table};
