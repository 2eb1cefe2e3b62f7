//! Report modes
//!
//! Each mode is one extraction pass over the documentation or PEP sites:
//! - `whats-new`: release notes title and editors per Python version
//! - `latest-versions`: documentation versions listed in the sidebar
//! - `download`: the A4 PDF documentation archive, saved to disk
//! - `pep`: PEP counts per status, checked against the index

mod download;
mod latest_versions;
mod pep;
pub mod selectors;
pub mod status;
mod whats_new;

pub use download::{archive_file_name, download, parse_archive_href};
pub use latest_versions::{latest_versions, parse_version_label, parse_versions};
pub use pep::{parse_pep_index, parse_pep_status, pep, summarize_statuses, PepIndexEntry};
pub use whats_new::{parse_release_index, parse_release_page, whats_new};

use crate::config::Config;
use crate::output::Table;
use crate::scrape::Fetcher;
use crate::ScrapeError;
use clap::ValueEnum;
use std::fmt;

/// Report type selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Release notes per Python version
    WhatsNew,
    /// Documentation versions and their status
    LatestVersions,
    /// Download the A4 PDF documentation archive
    Download,
    /// PEP counts per status
    Pep,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Self::WhatsNew, Self::LatestVersions, Self::Download, Self::Pep];

    /// Command-line name, also used in report file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }

    /// Runs the extraction for this mode
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Table))` - A report table for the output sink
    /// * `Ok(None)` - The mode produces no table (`download`)
    /// * `Err(ScrapeError)` - A fetch or a required lookup failed
    pub async fn run(
        self,
        fetcher: &mut Fetcher,
        config: &Config,
    ) -> Result<Option<Table>, ScrapeError> {
        match self {
            Self::WhatsNew => whats_new(fetcher, config).await.map(Some),
            Self::LatestVersions => latest_versions(fetcher, config).await.map(Some),
            Self::Download => download(fetcher, config).await.map(|_| None),
            Self::Pep => pep(fetcher, config).await.map(Some),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
