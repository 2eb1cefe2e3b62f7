use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Pydocs-Scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub urls: UrlsConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

/// Roots of the two scraped sites
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UrlsConfig {
    /// Python documentation root, e.g. `https://docs.python.org/3/`
    #[serde(rename = "main-doc-url")]
    pub main_doc_url: String,

    /// PEP index root, e.g. `https://peps.python.org/`
    #[serde(rename = "pep-index-url")]
    pub pep_index_url: String,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            main_doc_url: "https://docs.python.org/3/".to_string(),
            pep_index_url: "https://peps.python.org/".to_string(),
        }
    }
}

/// Locations of everything the tool writes to disk
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory all other paths are relative to
    #[serde(rename = "base-dir")]
    pub base_dir: PathBuf,

    #[serde(rename = "logs-dir")]
    pub logs_dir: String,

    #[serde(rename = "downloads-dir")]
    pub downloads_dir: String,

    #[serde(rename = "results-dir")]
    pub results_dir: String,

    /// SQLite file backing the response cache
    #[serde(rename = "cache-file")]
    pub cache_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            logs_dir: "logs".to_string(),
            downloads_dir: "downloads".to_string(),
            results_dir: "results".to_string(),
            cache_file: "http_cache.sqlite".to_string(),
        }
    }
}

impl PathsConfig {
    pub fn logs_path(&self) -> PathBuf {
        self.base_dir.join(&self.logs_dir)
    }

    pub fn downloads_path(&self) -> PathBuf {
        self.base_dir.join(&self.downloads_dir)
    }

    pub fn results_path(&self) -> PathBuf {
        self.base_dir.join(&self.results_dir)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.base_dir.join(&self.cache_file)
    }
}

/// Log file rotation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    #[serde(rename = "file-name")]
    pub file_name: String,

    /// Size at which the log file is rotated
    #[serde(rename = "max-bytes")]
    pub max_bytes: u64,

    /// Number of rotated files kept next to the live one
    #[serde(rename = "backup-count")]
    pub backup_count: usize,

    /// Minimum level written to the log file
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_name: "parser.log".to_string(),
            max_bytes: 1_048_576,
            backup_count: 5,
            level: "info".to_string(),
        }
    }
}

/// HTTP client and cache policy settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Age after which a cached response is refetched; never expires when unset
    #[serde(rename = "expire-after-secs")]
    pub expire_after_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("pydocs-scraper/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            expire_after_secs: None,
        }
    }
}
