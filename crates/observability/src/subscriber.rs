//! Subscriber construction.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::format::LineFormat;

/// Default diagnostic log file.
pub const DEFAULT_LOG_PATH: &str = "inventory.log";

/// Where diagnostics go and how much of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file, opened in append mode.
    pub path: PathBuf,
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
            default_filter: "info".to_string(),
        }
    }
}

impl LogConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Build a line-formatted subscriber writing to `writer`.
pub fn subscriber_for<W>(writer: W, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(LineFormat)
        .with_writer(writer)
        .finish()
}

/// Open (or create) the log file for appending.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). If the log
/// file cannot be opened, output falls back to stderr.
pub fn init(config: &LogConfig) {
    match open_log_file(&config.path) {
        Ok(file) => {
            let _ = tracing::subscriber::set_global_default(subscriber_for(
                Mutex::new(file),
                config.filter(),
            ));
        }
        Err(err) => {
            let installed = tracing::subscriber::set_global_default(subscriber_for(
                io::stderr,
                config.filter(),
            ))
            .is_ok();
            if installed {
                tracing::warn!(
                    "Cannot open log file {}: {err}. Logging to stderr.",
                    config.path.display()
                );
            }
        }
    }
}
