//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::models::{ExportFormat, DEFAULT_LOUDNESS_DB, DEFAULT_MARGIN_SECONDS};
use crate::paths;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Output and log folders.
    #[serde(default)]
    pub paths: PathSettings,

    /// How to launch auto-editor.
    #[serde(default)]
    pub tool: ToolSettings,

    /// Defaults for the export form.
    #[serde(default)]
    pub export: ExportSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Sections of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Tool,
    Export,
    Logging,
}

impl ConfigSection {
    /// Every section, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Paths,
        ConfigSection::Tool,
        ConfigSection::Export,
        ConfigSection::Logging,
    ];

    /// TOML table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Tool => "tool",
            ConfigSection::Export => "export",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the table.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "Output and log directories",
            ConfigSection::Tool => "External tool (auto-editor) launch settings",
            ConfigSection::Export => "Default export settings",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder exports are written to.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last input file picked.
    #[serde(default)]
    pub last_input_path: String,
}

fn default_output_folder() -> String {
    paths::default_output_directory_path()
        .to_string_lossy()
        .to_string()
}

fn default_logs_folder() -> String {
    paths::default_logs_directory_path()
        .to_string_lossy()
        .to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
            last_input_path: String::new(),
        }
    }
}

/// How the export tool is launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed between the program and the input file, for
    /// launching through an interpreter (`python3 -m auto_editor`).
    #[serde(default)]
    pub prefix_args: Vec<String>,
}

fn default_program() -> String {
    crate::command::DEFAULT_TOOL.to_string()
}

impl ToolSettings {
    /// Program to launch; a blank setting means auto-editor on the PATH.
    pub fn effective_program(&self) -> &str {
        let program = self.program.trim();
        if program.is_empty() {
            crate::command::DEFAULT_TOOL
        } else {
            program
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            prefix_args: Vec::new(),
        }
    }
}

/// Defaults pre-filled in the export form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Format name; unknown names resolve to mp4.
    #[serde(default = "default_format")]
    pub format: String,

    /// Loudness target in dB.
    #[serde(default = "default_loudness")]
    pub loudness_db: f64,

    /// Margin around cuts in seconds.
    #[serde(default)]
    pub margin_seconds: f64,
}

fn default_format() -> String {
    ExportFormat::Premiere.as_str().to_string()
}

fn default_loudness() -> f64 {
    DEFAULT_LOUDNESS_DB
}

impl ExportSettings {
    /// Resolved export format.
    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_name(&self.format)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            loudness_db: default_loudness(),
            margin_seconds: DEFAULT_MARGIN_SECONDS,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Keep tool output out of the log unless the export fails.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of output lines kept for error display.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Log the command one option per line.
    #[serde(default)]
    pub show_options_pretty: bool,

    /// Log the argument vector as JSON.
    #[serde(default)]
    pub show_options_json: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            show_options_pretty: false,
            show_options_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_get_defaults() {
        let settings: Settings =
            toml::from_str("[tool]\nprogram = \"/opt/ae/auto-editor\"\n").unwrap();
        assert_eq!(settings.tool.program, "/opt/ae/auto-editor");
        assert!(settings.tool.prefix_args.is_empty());
        assert_eq!(settings.export, ExportSettings::default());
        assert_eq!(settings.logging.error_tail, 20);
    }

    #[test]
    fn unknown_format_name_resolves_to_mp4() {
        let settings: Settings = toml::from_str("[export]\nformat = \"betamax\"\n").unwrap();
        assert_eq!(settings.export.export_format(), ExportFormat::Mp4);
        assert_eq!(settings.export.loudness_db, -19.0);
    }

    #[test]
    fn default_export_is_premiere() {
        assert_eq!(
            ExportSettings::default().export_format(),
            ExportFormat::Premiere
        );
    }

    #[test]
    fn blank_program_means_default_tool() {
        let tool = ToolSettings {
            program: "  ".to_string(),
            prefix_args: Vec::new(),
        };
        assert_eq!(tool.effective_program(), "auto-editor");
        assert_eq!(ToolSettings::default().effective_program(), "auto-editor");
    }

    #[test]
    fn section_names_are_unique() {
        let names: std::collections::HashSet<_> =
            ConfigSection::ALL.iter().map(|s| s.table_name()).collect();
        assert_eq!(names.len(), ConfigSection::ALL.len());
    }
}
