//! CLI argument definitions.

use std::path::PathBuf;

use aeg_core::logging::LogLevel;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `auto-editor-gui`.
#[derive(Debug, Parser)]
#[command(
    name = "auto-editor-gui",
    version,
    about = "Export auto-editor timelines for video editors"
)]
pub struct Cli {
    /// Settings file (defaults to the per-user config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info", value_parser = parse_log_level)]
    pub log_level: LogLevel,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run auto-editor on a media file.
    Export(ExportArgs),
    /// Print the command an export would run, without running it.
    Preview(ExportArgs),
    /// List export formats.
    Formats,
    /// Show the settings file location and contents.
    Config,
}

/// Options shared by `export` and `preview`. Unset values come from the
/// `[export]` settings.
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Source media file.
    pub input: Option<PathBuf>,

    /// Export format (premiere, resolve-fcp7, final-cut-pro, resolve,
    /// shotcut, json, timeline, audio, clip-sequence, mp4).
    #[arg(long)]
    pub format: Option<String>,

    /// Loudness target, e.g. -19 or -19dB.
    #[arg(long, allow_hyphen_values = true)]
    pub loudness: Option<String>,

    /// Margin around cuts, e.g. 0.2 or 0.2s.
    #[arg(long, allow_hyphen_values = true)]
    pub margin: Option<String>,

    /// Output folder.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Open a file chooser when no input is given.
    #[arg(long)]
    pub pick: bool,

    /// Open a folder chooser when no output folder is given.
    #[arg(long)]
    pub pick_output: bool,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(value).ok_or_else(|| {
        format!(
            "unknown log level '{}' (expected trace, debug, info, warn or error)",
            value
        )
    })
}
