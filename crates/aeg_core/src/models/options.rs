//! Export options collected from the front-end.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enums::ExportFormat;

/// Loudness target used when the field is empty or malformed.
pub const DEFAULT_LOUDNESS_DB: f64 = -19.0;

/// Margin used when the field is empty or malformed.
pub const DEFAULT_MARGIN_SECONDS: f64 = 0.0;

/// Reasons an export can't be attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No input file selected")]
    NoInputFile,

    #[error("An export is already running")]
    ExportInFlight,
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Everything needed to build one auto-editor invocation.
///
/// Built fresh for every export action and passed by value; nothing here is
/// shared between exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Source media file.
    pub input_path: PathBuf,
    /// Target format, also decides the output extension.
    pub export_format: ExportFormat,
    /// Loudness target in dB.
    pub loudness_db: f64,
    /// Margin kept around cuts, in seconds.
    pub margin_seconds: f64,
    /// Folder the result is written to.
    pub output_directory: PathBuf,
}

impl ExportOptions {
    /// Create options with default loudness, margin and format.
    pub fn new(input_path: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            export_format: ExportFormat::default(),
            loudness_db: DEFAULT_LOUDNESS_DB,
            margin_seconds: DEFAULT_MARGIN_SECONDS,
            output_directory: output_directory.into(),
        }
    }

    /// Set the export format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }

    /// Set the loudness target.
    pub fn with_loudness(mut self, loudness_db: f64) -> Self {
        self.loudness_db = loudness_db;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin_seconds: f64) -> Self {
        self.margin_seconds = margin_seconds;
        self
    }

    /// Check the options can be executed.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ValidationError::NoInputFile);
        }
        Ok(())
    }

    /// Loudness with non-finite values replaced by the default.
    pub fn effective_loudness(&self) -> f64 {
        if self.loudness_db.is_finite() {
            self.loudness_db
        } else {
            DEFAULT_LOUDNESS_DB
        }
    }

    /// Margin clamped to a finite, non-negative value.
    pub fn effective_margin(&self) -> f64 {
        if self.margin_seconds.is_finite() && self.margin_seconds > 0.0 {
            self.margin_seconds
        } else {
            DEFAULT_MARGIN_SECONDS
        }
    }
}

/// Parse a loudness field as typed by the user ("-19", "-19dB", "").
pub fn parse_loudness(text: &str) -> f64 {
    parse_number(text, &["db", "dB", "DB"]).unwrap_or(DEFAULT_LOUDNESS_DB)
}

/// Parse a margin field as typed by the user ("0.2", "0.2s", "").
///
/// Negative values clamp to zero.
pub fn parse_margin(text: &str) -> f64 {
    parse_number(text, &["sec", "s"])
        .filter(|value| *value > 0.0)
        .unwrap_or(DEFAULT_MARGIN_SECONDS)
}

fn parse_number(text: &str, suffixes: &[&str]) -> Option<f64> {
    let mut trimmed = text.trim();
    for suffix in suffixes {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            trimmed = stripped.trim_end();
            break;
        }
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let options = ExportOptions::new("/videos/a.mp4", "/out");
        assert_eq!(options.export_format, ExportFormat::Mp4);
        assert_eq!(options.loudness_db, -19.0);
        assert_eq!(options.margin_seconds, 0.0);
    }

    #[test]
    fn empty_input_is_a_validation_gap() {
        let options = ExportOptions::new("", "/out");
        assert_eq!(options.validate(), Err(ValidationError::NoInputFile));
        assert!(ExportOptions::new("/videos/a.mp4", "/out").validate().is_ok());
    }

    #[test]
    fn parses_loudness_with_and_without_unit() {
        assert_eq!(parse_loudness("-24"), -24.0);
        assert_eq!(parse_loudness("-24dB"), -24.0);
        assert_eq!(parse_loudness(" -12.5 db "), -12.5);
    }

    #[test]
    fn malformed_loudness_defaults() {
        assert_eq!(parse_loudness(""), DEFAULT_LOUDNESS_DB);
        assert_eq!(parse_loudness("loud"), DEFAULT_LOUDNESS_DB);
        assert_eq!(parse_loudness("NaN"), DEFAULT_LOUDNESS_DB);
    }

    #[test]
    fn margin_parsing_clamps_and_defaults() {
        assert_eq!(parse_margin("0.2"), 0.2);
        assert_eq!(parse_margin("0.2s"), 0.2);
        assert_eq!(parse_margin("-1"), 0.0);
        assert_eq!(parse_margin("None"), 0.0);
    }

    #[test]
    fn effective_values_sanitize_non_finite() {
        let options = ExportOptions::new("/a.mp4", "/out")
            .with_loudness(f64::NAN)
            .with_margin(f64::INFINITY);
        assert_eq!(options.effective_loudness(), DEFAULT_LOUDNESS_DB);
        assert_eq!(options.effective_margin(), DEFAULT_MARGIN_SECONDS);

        let options = options.with_margin(-3.0);
        assert_eq!(options.effective_margin(), 0.0);
    }
}
