//! Configuration management for Auto Editor GUI.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use aeg_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new("settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Tool: {}", config.settings().tool.program);
//!
//! config.settings_mut().export.loudness_db = -16.0;
//! config.update_section(ConfigSection::Export).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, ExportSettings, LoggingSettings, PathSettings, Settings, ToolSettings,
};
