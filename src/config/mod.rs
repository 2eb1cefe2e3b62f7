//! Configuration module for Pydocs-Scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file is
//! the same as running with an empty one.
//!
//! # Example
//!
//! ```no_run
//! use pydocs_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pydocs.toml")).unwrap();
//! println!("Docs root: {}", config.urls.main_doc_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, LoggingConfig, PathsConfig, UrlsConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, MAX_EXPIRE_AFTER_SECS};
