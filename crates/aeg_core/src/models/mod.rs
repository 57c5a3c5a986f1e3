//! Data models for Auto Editor GUI.
//!
//! - Enums for export formats, alert kinds and output streams
//! - Export options collected from the front-end
//! - The user-facing alert

mod alert;
mod enums;
mod options;

pub use alert::AlertState;
pub use enums::{AlertKind, ExportFormat, OutputStream};
pub use options::{
    parse_loudness, parse_margin, ExportOptions, ValidationError, ValidationResult,
    DEFAULT_LOUDNESS_DB, DEFAULT_MARGIN_SECONDS,
};
