//! Logging infrastructure for Auto Editor GUI.
//!
//! This module provides:
//! - Per-export loggers with file + UI callback output
//! - Compact mode that keeps tool output out of the log until a failure
//! - Tail buffer for error diagnosis
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use aeg_core::logging::{ExportLogger, LogConfig};
//!
//! let logger = ExportLogger::new("talk", "/path/to/logs", LogConfig::default(), None).unwrap();
//!
//! logger.phase("Export");
//! logger.command("auto-editor talk.mp4 --export premiere ...");
//! logger.success("Export completed successfully");
//! ```

mod export_logger;
mod types;

use std::path::Path;

pub use export_logger::{ExportLogger, ExportLoggerBuilder};
pub use types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the application log.
const APP_LOG_PREFIX: &str = "auto-editor-gui";

/// Initialize global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG`, falls back to `default_level`, writes to stderr.
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(env_filter(default_level))
        .init();
}

/// Like [`init_tracing`], plus a daily rolling log file in `logs_dir`.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the file writer. Returns `None` when the file could not
/// be opened, in which case only stderr logging is active.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(APP_LOG_PREFIX)
        .filename_suffix("log")
        .build(logs_dir);

    let (file_layer, guard) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        Err(e) => {
            eprintln!(
                "Warning: file logging disabled ({}): {}",
                logs_dir.display(),
                e
            );
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(file_layer)
        .with(env_filter(default_level))
        .init();

    guard
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)))
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }
}
