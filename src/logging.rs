//! Logging setup
//!
//! Log lines go to stderr and to a size-rotated file under the logs
//! directory. Lines look like `09.03.2024 07:05:01 - [INFO] - message`.

use crate::config::Config;
use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Timestamp format of log lines
pub const LOG_TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Keeps the background log writer alive; logs are flushed when dropped
pub struct LogGuard {
    _file: WorkerGuard,
}

/// `<time> - [<LEVEL>] - <message>` event format
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} - [{}] - ",
            chrono::Local::now().format(LOG_TIME_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Sets up the tracing subscriber
///
/// # Arguments
///
/// * `config` - Supplies the logs directory, rotation limits and file level
/// * `verbose` - Raises the stderr level (`-v` debug, `-vv` trace)
pub fn setup_logging(config: &Config, verbose: u8) -> io::Result<LogGuard> {
    let log_path = config.paths.logs_path().join(&config.logging.file_name);
    let file = RotatingFile::open(
        &log_path,
        config.logging.max_bytes,
        config.logging.backup_count,
    )?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let stderr_filter = match verbose {
        0 => EnvFilter::new("pydocs_scraper=info,warn"),
        1 => EnvFilter::new("pydocs_scraper=debug,info"),
        _ => EnvFilter::new("trace"),
    };
    let file_filter = EnvFilter::new(format!(
        "pydocs_scraper={},warn",
        config.logging.level.to_ascii_lowercase()
    ));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_writer(io::stderr)
        .with_filter(stderr_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(LogGuard { _file: guard })
}

/// Log file that is rotated once it would grow past `max_bytes`
///
/// On rotation `parser.log` becomes `parser.log.1`, `parser.log.1` becomes
/// `parser.log.2` and so on; files past `backup_count` are deleted. With a
/// `backup_count` of zero the file is never rotated.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Opens `path` for appending, creating the parent directory
    pub fn open(path: &Path, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = open_append(path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.backup_path(self.backup_count);
        if oldest.exists() {
            std::fs::remove_file(&oldest)?;
        }
        for index in (1..self.backup_count).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                std::fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        std::fs::rename(&self.path, self.backup_path(1))?;

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let would_overflow = self.written + buf.len() as u64 > self.max_bytes;
        if self.backup_count > 0 && self.written > 0 && would_overflow {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
