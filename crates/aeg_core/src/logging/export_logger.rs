//! Per-export logger with file and callback output.
//!
//! Each export gets its own logger that:
//! - Writes to a dedicated log file
//! - Sends messages to a UI callback (if provided)
//! - Keeps tool output out of the log in compact mode
//! - Maintains a tail buffer for error diagnosis

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

use crate::command::format_tokens_pretty;
use crate::exec::{OutputLine, TailBuffer};
use crate::models::{AlertKind, AlertState};

use super::types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

/// Per-export logger with dual output (file + UI).
pub struct ExportLogger {
    /// Export name, usually the input file stem.
    name: String,
    /// Path to log file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Arc<Mutex<Option<BufWriter<File>>>>,
    /// UI callback for sending messages.
    callback: Arc<Mutex<Option<LogCallback>>>,
    /// Logging configuration.
    config: LogConfig,
    /// Recent tool output (used for error diagnosis).
    tail_buffer: Arc<Mutex<TailBuffer>>,
}

impl ExportLogger {
    /// Create a new export logger.
    ///
    /// # Arguments
    /// * `name` - Name of the export (used in log filename)
    /// * `log_dir` - Directory to write log file to
    /// * `config` - Logging configuration
    /// * `callback` - Optional callback for UI output
    pub fn new(
        name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> std::io::Result<Self> {
        let name = name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&name)));
        let file = File::create(&log_path)?;

        Ok(Self {
            name,
            log_path,
            file_writer: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
            callback: Arc::new(Mutex::new(callback)),
            tail_buffer: Arc::new(Mutex::new(TailBuffer::new(config.error_tail))),
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        let formatted = self.format_message(message);
        self.output(&formatted);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        let msg = MessagePrefix::Warning.format(message);
        self.log(LogLevel::Warn, &msg);
    }

    pub fn error(&self, message: &str) {
        let msg = MessagePrefix::Error.format(message);
        self.log(LogLevel::Error, &msg);
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        let msg = MessagePrefix::Command.format(command);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        let msg = MessagePrefix::Phase.format(phase_name);
        self.log(LogLevel::Info, &msg);
    }

    pub fn success(&self, message: &str) {
        let msg = MessagePrefix::Success.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log the final alert with the prefix matching its kind.
    pub fn alert(&self, alert: &AlertState) {
        match alert.kind {
            AlertKind::InProgress => self.info(&alert.message),
            AlertKind::Success => self.success(&alert.message),
            AlertKind::Error => self.error(&alert.message),
        }
    }

    /// Log one line of tool output.
    ///
    /// Every line goes to the tail buffer. In compact mode nothing else
    /// happens until [`show_tail`](Self::show_tail) is called.
    pub fn output_line(&self, line: &OutputLine) {
        self.tail_buffer.lock().push(line.text.clone());

        if self.config.compact {
            return;
        }

        let prefix = if line.is_stderr() { "[stderr] " } else { "" };
        let msg = format!("{}{}", prefix, line.text);
        self.output(&self.format_message(&msg));
    }

    /// Show the tail buffer (typically after an error).
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in buffer.lines() {
            self.output(&self.format_message(&line));
        }
    }

    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    /// Get the current tail buffer contents.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().lines()
    }

    /// Log an argument vector one option per line.
    pub fn log_options_pretty(&self, tokens: &[String]) {
        self.info("--- auto-editor options (pretty) ---");
        self.info(format_tokens_pretty(tokens).trim_end());
        self.info("------------------------------------");
    }

    /// Log an argument vector as JSON.
    pub fn log_options_json(&self, tokens: &[String]) {
        self.info("--- auto-editor options (json) ---");
        if let Ok(json) = serde_json::to_string_pretty(tokens) {
            self.info(&json);
        }
        self.info("----------------------------------");
    }

    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the logger and release the file.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }

        if let Some(ref callback) = *self.callback.lock() {
            callback(formatted);
        }
    }
}

impl Drop for ExportLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a filename.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();
    if cleaned.trim().is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}

/// Builder for creating ExportLogger with fluent API.
pub struct ExportLoggerBuilder {
    name: String,
    log_dir: PathBuf,
    config: LogConfig,
    callback: Option<LogCallback>,
}

impl ExportLoggerBuilder {
    pub fn new(name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            log_dir: log_dir.into(),
            config: LogConfig::default(),
            callback: None,
        }
    }

    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Enable or disable compact mode.
    pub fn compact(mut self, compact: bool) -> Self {
        self.config.compact = compact;
        self
    }

    pub fn callback(mut self, callback: LogCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn build(self) -> std::io::Result<ExportLogger> {
        ExportLogger::new(self.name, self.log_dir, self.config, self.callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    fn quiet_config() -> LogConfig {
        LogConfig {
            show_timestamps: false,
            ..LogConfig::default()
        }
    }

    #[test]
    fn creates_log_file() {
        let dir = tempdir().unwrap();
        let logger = ExportLogger::new("talk", dir.path(), LogConfig::default(), None).unwrap();

        assert!(logger.log_path().exists());
        assert!(logger.log_path().ends_with("talk.log"));
    }

    #[test]
    fn writes_to_file() {
        let dir = tempdir().unwrap();
        let logger = ExportLogger::new("talk", dir.path(), LogConfig::default(), None).unwrap();

        logger.command("auto-editor talk.mp4 --export premiere");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("$ auto-editor talk.mp4 --export premiere"));
    }

    #[test]
    fn calls_callback() {
        let dir = tempdir().unwrap();
        let call_count = Arc::new(AtomicUsize::new(0));
        let count_clone = call_count.clone();

        let callback: LogCallback = Box::new(move |_msg| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let logger = ExportLoggerBuilder::new("talk", dir.path())
            .callback(callback)
            .build()
            .unwrap();

        logger.info("Message 1");
        logger.phase("Export");

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn compact_mode_keeps_output_in_tail_only() {
        let dir = tempdir().unwrap();
        let logger = ExportLogger::new("talk", dir.path(), quiet_config(), None).unwrap();

        logger.output_line(&OutputLine::stdout("frame 120"));
        logger.output_line(&OutputLine::stderr("Error! bad codec"));
        logger.flush();

        assert_eq!(fs::read_to_string(logger.log_path()).unwrap(), "");
        assert_eq!(logger.get_tail(), vec!["frame 120", "Error! bad codec"]);

        logger.show_tail("auto-editor");
        logger.flush();
        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.starts_with("[auto-editor/tail]\n"));
        assert!(content.contains("Error! bad codec"));
    }

    #[test]
    fn verbose_mode_marks_stderr() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            compact: false,
            ..quiet_config()
        };
        let logger = ExportLogger::new("talk", dir.path(), config, None).unwrap();

        logger.output_line(&OutputLine::stdout("Finished."));
        logger.output_line(&OutputLine::stderr("warning"));
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert_eq!(content, "Finished.\n[stderr] warning\n");
    }

    #[test]
    fn tail_buffer_maintains_limit() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            error_tail: 5,
            ..LogConfig::default()
        };
        let logger = ExportLogger::new("talk", dir.path(), config, None).unwrap();

        for i in 0..10 {
            logger.output_line(&OutputLine::stdout(format!("Line {}", i)));
        }

        let tail = logger.get_tail();
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0], "Line 5");
        assert_eq!(tail[4], "Line 9");

        logger.clear_tail();
        assert!(logger.get_tail().is_empty());
    }

    #[test]
    fn level_filters_debug() {
        let dir = tempdir().unwrap();
        let logger = ExportLoggerBuilder::new("talk", dir.path())
            .config(quiet_config())
            .level(LogLevel::Info)
            .build()
            .unwrap();

        logger.debug("hidden");
        logger.warn("shown");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert_eq!(content, "[WARNING] shown\n");
    }

    #[test]
    fn alert_uses_matching_prefix() {
        let dir = tempdir().unwrap();
        let logger = ExportLogger::new("talk", dir.path(), quiet_config(), None).unwrap();

        logger.alert(&AlertState::success("Export completed successfully"));
        logger.alert(&AlertState::error("tool exited with code 2"));
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("[SUCCESS] Export completed successfully"));
        assert!(content.contains("[ERROR] tool exited with code 2"));
    }

    #[test]
    fn options_logged_as_json() {
        let dir = tempdir().unwrap();
        let logger = ExportLogger::new("talk", dir.path(), quiet_config(), None).unwrap();

        logger.log_options_json(&["auto-editor".to_string(), "a b.mp4".to_string()]);
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("\"a b.mp4\""));
    }

    #[test]
    fn sanitizes_filename() {
        assert_eq!(sanitize_filename("normal_name"), "normal_name");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("a<b>c"), "a_b_c");
        assert_eq!(sanitize_filename(""), "export");
    }
}
