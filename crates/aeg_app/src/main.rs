//! Auto Editor GUI - Main entry point
//!
//! Handles:
//! - Application-level logging initialization
//! - Configuration loading
//! - Directory creation
//! - Dispatch to the export front-end

use std::process::ExitCode;

use clap::Parser;

use aeg_core::config::ConfigManager;
use aeg_core::logging::{init_tracing, init_tracing_with_file};
use aeg_core::paths;

mod cli;
mod desktop;
mod handlers;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    // Load configuration first (needed for logs directory path)
    let config_path = cli.config.clone().unwrap_or_else(paths::default_config_path);
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    // Listing commands only read settings: no log file, no folders
    let _log_guard = match cli.command {
        Command::Formats | Command::Config => {
            init_tracing(cli.log_level);
            None
        }
        Command::Export(_) | Command::Preview(_) => {
            let guard = init_tracing_with_file(cli.log_level, &config_manager.logs_folder());
            if let Err(e) = config_manager.ensure_dirs_exist() {
                tracing::error!("Failed to create directories: {}", e);
            }
            guard
        }
    };

    tracing::debug!("Auto Editor GUI {} starting", aeg_core::version());
    tracing::debug!("Config: {}", config_path.display());

    match cli.command {
        Command::Export(args) => handlers::export(&mut config_manager, &args).await,
        Command::Preview(args) => handlers::preview(&config_manager, &args).await,
        Command::Formats => {
            handlers::formats();
            Ok(true)
        }
        Command::Config => {
            handlers::show_config(&config_manager)?;
            Ok(true)
        }
    }
}
