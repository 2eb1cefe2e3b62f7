//! Run driver
//!
//! A [`Context`] owns the configuration and the cached fetcher for one run.
//! It is built once in `main` and passed down, so nothing below it reaches
//! for global state.

use crate::cache::open_cache;
use crate::config::Config;
use crate::extract::Mode;
use crate::output::{render, OutputFormat, Table};
use crate::scrape::Fetcher;
use crate::ScrapeError;

/// Everything a report mode needs for one run
pub struct Context {
    pub config: Config,
    pub fetcher: Fetcher,
}

impl Context {
    /// Opens the response cache and builds the HTTP client from `config`
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let cache = open_cache(&config.paths.cache_path())?;
        let fetcher = Fetcher::from_config(&config.http, cache)?;
        Ok(Self { config, fetcher })
    }

    /// Runs `mode` and returns its table without rendering it
    ///
    /// With `clear_cache` the response cache is emptied before the first
    /// request, so every page of this run is fetched live.
    pub async fn extract(
        &mut self,
        mode: Mode,
        clear_cache: bool,
    ) -> Result<Option<Table>, ScrapeError> {
        if clear_cache {
            self.fetcher.clear_cache()?;
        }

        tracing::info!("Running mode: {}", mode);
        let table = mode.run(&mut self.fetcher, &self.config).await?;

        let stats = self.fetcher.stats();
        tracing::debug!(
            "Cache hits: {}, misses: {}",
            stats.hits,
            stats.misses
        );
        Ok(table)
    }

    /// Runs `mode` and hands the resulting table to the output sink
    pub async fn run(
        &mut self,
        mode: Mode,
        output: Option<OutputFormat>,
        clear_cache: bool,
    ) -> Result<(), ScrapeError> {
        if let Some(table) = self.extract(mode, clear_cache).await? {
            render(
                &table,
                output,
                mode.name(),
                &self.config.paths.results_path(),
            )?;
        }
        Ok(())
    }
}
