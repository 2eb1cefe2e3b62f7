//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Serving repeated requests from the response cache
//! - Decoding bodies with an explicit character encoding
//! - Mapping every transport failure to `ScrapeError::Transport`

use crate::cache::{cache_key, CachedResponse, ResponseCache};
use crate::config::HttpConfig;
use crate::scrape::PageDocument;
use crate::{ConfigError, ScrapeError};
use chrono::Utc;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Encoding used when the caller does not ask for another one
pub const DEFAULT_ENCODING: &str = "utf-8";

/// A fetched page
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Undecoded body, used for binary downloads
    pub bytes: Vec<u8>,
    /// Body decoded with the requested encoding
    pub text: String,
    /// Whether the page was served from the response cache
    pub from_cache: bool,
}

impl RawPage {
    fn new(url: Url, status: u16, bytes: Vec<u8>, encoding: &str, from_cache: bool) -> Self {
        let text = decode(&bytes, encoding);
        Self {
            url,
            status,
            bytes,
            text,
            from_cache,
        }
    }

    /// True for any status below 400
    pub fn is_ok(&self) -> bool {
        self.status < 400
    }
}

/// Cache hit/miss counters for one fetcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Cached HTTP GET client
///
/// Every report mode fetches through one `Fetcher`. Only `200 OK` responses
/// are stored; anything else is passed through and fetched again next time.
pub struct Fetcher {
    client: Client,
    cache: Box<dyn ResponseCache + Send>,
    expire_after: Option<chrono::Duration>,
    stats: CacheStats,
}

impl Fetcher {
    pub fn new(
        client: Client,
        cache: impl ResponseCache + Send + 'static,
        expire_after: Option<chrono::Duration>,
    ) -> Self {
        Self {
            client,
            cache: Box::new(cache),
            expire_after,
            stats: CacheStats::default(),
        }
    }

    /// Builds the client and cache policy from configuration
    pub fn from_config(
        config: &HttpConfig,
        cache: impl ResponseCache + Send + 'static,
    ) -> Result<Self, ScrapeError> {
        let client = build_http_client(config)?;
        let expire_after = config
            .expire_after_secs
            .map(|secs| {
                i64::try_from(secs)
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .ok_or_else(|| {
                        ConfigError::Validation(format!(
                            "expire-after-secs out of range: {}",
                            secs
                        ))
                    })
            })
            .transpose()?;
        Ok(Self::new(client, cache, expire_after))
    }

    /// Drops every cached response
    pub fn clear_cache(&mut self) -> Result<(), ScrapeError> {
        let dropped = self.cache.len()?;
        self.cache.clear()?;
        tracing::info!("Response cache cleared ({} entries)", dropped);
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Fetches `url`, decoding the body as UTF-8
    pub async fn fetch(&mut self, url: &Url) -> Result<RawPage, ScrapeError> {
        self.fetch_with_encoding(url, DEFAULT_ENCODING).await
    }

    /// Fetches `url` through the cache, decoding the body with `encoding`
    ///
    /// A fresh cache entry is returned without touching the network. Non-2xx
    /// statuses are not errors here; check [`RawPage::is_ok`].
    pub async fn fetch_with_encoding(
        &mut self,
        url: &Url,
        encoding: &str,
    ) -> Result<RawPage, ScrapeError> {
        let key = cache_key("GET", url.as_str());

        if let Some(cached) = self.cache.get(&key)? {
            if !cached.is_expired(self.expire_after, Utc::now()) {
                self.stats.hits += 1;
                tracing::debug!("Cache hit: {}", url);
                let final_url = Url::parse(&cached.url).unwrap_or_else(|_| url.clone());
                return Ok(RawPage::new(
                    final_url,
                    cached.status,
                    cached.body,
                    encoding,
                    true,
                ));
            }
            tracing::debug!("Cache entry expired: {}", url);
        }

        self.stats.misses += 1;
        tracing::debug!("GET {}", url);

        let transport = |source: reqwest::Error| ScrapeError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;
        let status = response.status();
        let final_url = response.url().clone();
        let bytes = response.bytes().await.map_err(transport)?.to_vec();

        if status == StatusCode::OK {
            let entry = CachedResponse::new(final_url.as_str(), status.as_u16(), bytes.clone());
            self.cache.put(&key, &entry)?;
        } else {
            tracing::debug!("Not caching {} (HTTP {})", url, status.as_u16());
        }

        Ok(RawPage::new(final_url, status.as_u16(), bytes, encoding, false))
    }

    /// Fetches and parses a page
    ///
    /// Returns `Ok(None)` when the server answered with an error status, so the
    /// caller can decide between skipping and failing.
    pub async fn fetch_document(&mut self, url: &Url) -> Result<Option<PageDocument>, ScrapeError> {
        let page = self.fetch(url).await?;
        if !page.is_ok() {
            tracing::warn!("{} answered with HTTP {}", url, page.status);
            return Ok(None);
        }
        Ok(Some(PageDocument::parse(&page.text)))
    }

    /// Like [`Fetcher::fetch_document`] but an error status is fatal
    pub async fn require_document(&mut self, url: &Url) -> Result<PageDocument, ScrapeError> {
        let page = self.fetch(url).await?;
        if !page.is_ok() {
            return Err(ScrapeError::PageUnavailable {
                url: url.to_string(),
                status: page.status,
            });
        }
        Ok(PageDocument::parse(&page.text))
    }
}

/// Decodes `bytes` with a WHATWG encoding label, falling back to UTF-8
fn decode(bytes: &[u8], label: &str) -> String {
    let encoding = Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        tracing::warn!("Unknown encoding '{}', decoding as utf-8", label);
        UTF_8
    });
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}
