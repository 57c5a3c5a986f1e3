//! Subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;

use aeg_core::capability::ExportCapabilities;
use aeg_core::command;
use aeg_core::config::{ConfigManager, ConfigSection, Settings};
use aeg_core::logging::{ExportLoggerBuilder, LogConfig};
use aeg_core::models::{
    parse_loudness, parse_margin, AlertKind, AlertState, ExportFormat, ExportOptions,
};
use aeg_core::paths;
use aeg_core::session::ExportSession;

use crate::cli::ExportArgs;
use crate::desktop::DesktopCapabilities;

/// Run one export. Returns true when it ended with a success alert.
pub async fn export(config: &mut ConfigManager, args: &ExportArgs) -> anyhow::Result<bool> {
    let settings = config.settings().clone();
    let mut caps = DesktopCapabilities::new(&settings);

    let input = resolve_input(args, &caps).await;
    let picked_output = pick_output_directory(args, &caps).await;
    let draft = export_options(args, &settings, input, PathBuf::new());

    let mut session =
        ExportSession::new().with_operation(format!("{} export", draft.export_format.label()));
    let started = session.begin(&draft);
    if let Some(alert) = session.alert() {
        print_alert(alert);
    }
    if started.is_err() {
        return Ok(false);
    }

    let output_directory = match picked_output {
        Some(dir) => dir,
        None => match caps.default_output_directory().await {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!("{}", e);
                print_alert(session.abort(e.to_string()));
                return Ok(false);
            }
        },
    };
    let options = ExportOptions {
        output_directory,
        ..draft
    };

    let invocation = command::build(&options, &settings.tool);
    println!("Generated command:");
    println!("{}", invocation.preview());

    match ExportLoggerBuilder::new(log_name(&options.input_path), config.logs_folder())
        .config(LogConfig::from_settings(&settings.logging))
        .build()
    {
        Ok(logger) => {
            if settings.logging.show_options_pretty {
                logger.log_options_pretty(invocation.argv());
            }
            if settings.logging.show_options_json {
                logger.log_options_json(invocation.argv());
            }
            tracing::debug!(
                "Export log for {}: {}",
                logger.name(),
                logger.log_path().display()
            );
            caps = caps.with_logger(logger);
        }
        Err(e) => tracing::warn!("Export log unavailable: {}", e),
    }

    let outcome = caps.run_export(&invocation).await;
    let alert = session.finish(&outcome).clone();
    if let Some(logger) = caps.logger() {
        logger.alert(&alert);
        logger.close();
    }
    print_alert(&alert);

    remember_input(config, &options.input_path);

    Ok(alert.kind == AlertKind::Success)
}

/// Print the command an export would run.
pub async fn preview(config: &ConfigManager, args: &ExportArgs) -> anyhow::Result<bool> {
    let settings = config.settings();
    let caps = DesktopCapabilities::new(settings);

    let input = resolve_input(args, &caps).await;
    let output_directory = pick_output_directory(args, &caps)
        .await
        .unwrap_or_else(|| configured_output_folder(settings));
    let options = export_options(args, settings, input, output_directory);

    if let Err(e) = options.validate() {
        print_alert(&AlertState::error(e.to_string()));
        return Ok(false);
    }

    let invocation = command::build(&options, &settings.tool);
    println!("{}", invocation.preview());
    println!();
    print!("{}", command::format_tokens_pretty(invocation.argv()));
    println!("Output file: {}", invocation.output_path().display());
    Ok(true)
}

/// List every export format.
pub fn formats() {
    println!("{:<14} {:<20} EXTENSION", "NAME", "LABEL");
    for format in ExportFormat::ALL {
        println!(
            "{:<14} {:<20} {}",
            format.as_str(),
            format.label(),
            format.extension()
        );
    }
}

/// Show the settings file path and its effective contents.
pub fn show_config(config: &ConfigManager) -> anyhow::Result<()> {
    println!("Config: {}", config.path().display());
    println!();
    let rendered = config
        .generate_config_with_comments()
        .context("Could not render settings")?;
    print!("{}", rendered);
    Ok(())
}

/// Merge CLI arguments over the `[export]` settings.
fn export_options(
    args: &ExportArgs,
    settings: &Settings,
    input: PathBuf,
    output_directory: PathBuf,
) -> ExportOptions {
    let format = args
        .format
        .as_deref()
        .map(ExportFormat::from_name)
        .unwrap_or_else(|| settings.export.export_format());
    let loudness = args
        .loudness
        .as_deref()
        .map(parse_loudness)
        .unwrap_or(settings.export.loudness_db);
    let margin = args
        .margin
        .as_deref()
        .map(parse_margin)
        .unwrap_or(settings.export.margin_seconds);

    ExportOptions::new(input, output_directory)
        .with_format(format)
        .with_loudness(loudness)
        .with_margin(margin)
}

/// Input from the command line, or the chooser with `--pick`. Empty when
/// neither gave one.
async fn resolve_input(args: &ExportArgs, caps: &impl ExportCapabilities) -> PathBuf {
    if let Some(input) = &args.input {
        return input.clone();
    }
    if args.pick {
        if let Some(picked) = caps.select_input_file().await {
            if !paths::is_media_file(&picked) {
                tracing::warn!("{} is not a known media type", picked.display());
            }
            return picked;
        }
        tracing::info!("No file selected");
    }
    PathBuf::new()
}

/// Output folder from `--output`, or the chooser with `--pick-output`.
/// `None` means the configured default applies.
async fn pick_output_directory(
    args: &ExportArgs,
    caps: &impl ExportCapabilities,
) -> Option<PathBuf> {
    if let Some(output) = &args.output {
        return Some(output.clone());
    }
    if args.pick_output {
        let picked = caps.select_output_directory().await;
        if picked.is_none() {
            tracing::info!("No folder selected, using the default output folder");
        }
        return picked;
    }
    None
}

fn configured_output_folder(settings: &Settings) -> PathBuf {
    if settings.paths.output_folder.trim().is_empty() {
        paths::default_output_directory_path()
    } else {
        PathBuf::from(&settings.paths.output_folder)
    }
}

/// Log file name: the input stem.
fn log_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string())
}

fn remember_input(config: &mut ConfigManager, input: &Path) {
    config.settings_mut().paths.last_input_path = input.to_string_lossy().to_string();
    if let Err(e) = config.update_section(ConfigSection::Paths) {
        tracing::warn!("Could not save last input path: {}", e);
    }
}

fn print_alert(alert: &AlertState) {
    match alert.kind {
        AlertKind::Error => eprintln!("{}", alert),
        _ => println!("{}", alert),
    }
}
