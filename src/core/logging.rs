//! Logging setup.
//!
//! Library code emits `tracing` events; the binary calls [`init`] once to
//! install the subscriber:
//! - stdout layer, human readable
//! - JSON file layer, rolled daily under the log directory
//! - `log` crate records bridged into `tracing`
//!
//! `RUST_LOG` overrides the default `info` filter.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file name prefix inside the log directory.
pub const LOG_FILE_PREFIX: &str = "fancyfam-cards.log";

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered file logs are flushed on shutdown.
pub fn init(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_filter(env_filter());

    // try_init also installs the `log` bridge. A second call (tests,
    // embedding apps) keeps the first subscriber.
    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
        return guard;
    }

    tracing::info!(log_dir = %log_dir.display(), "Logging initialized (daily rolling)");
    guard
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
