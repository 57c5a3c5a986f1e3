//! Per-user locations and media file recognition.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data dirs.
pub const APP_DIR_NAME: &str = "auto-editor-gui";

/// Name of the default export folder.
pub const OUTPUT_DIR_NAME: &str = "Auto Editor Output";

/// Extensions offered by the input file chooser.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "mov", "avi", "webm", "m4v", "ts", "m2ts", "mts", "wav", "mp3", "m4a", "flac",
];

/// Default config file: `<config dir>/auto-editor-gui/settings.toml`.
pub fn default_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join(APP_DIR_NAME).join("settings.toml")
    } else {
        PathBuf::from("settings.toml")
    }
}

/// Default export folder: `<data dir>/Auto Editor Output`.
///
/// On Windows the data dir is `%APPDATA%`.
pub fn default_output_directory_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(OUTPUT_DIR_NAME),
        None => PathBuf::from(OUTPUT_DIR_NAME),
    }
}

/// Default logs folder: `<data dir>/auto-editor-gui/logs`.
pub fn default_logs_directory_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(APP_DIR_NAME).join("logs"),
        None => PathBuf::from(".logs"),
    }
}

/// Resolve the configured output folder (blank means the per-user default)
/// and create it if absent.
pub fn resolve_output_directory(configured: &str) -> io::Result<PathBuf> {
    let dir = if configured.trim().is_empty() {
        default_output_directory_path()
    } else {
        PathBuf::from(configured)
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        tracing::info!("Directory created at: {}", dir.display());
    }
    Ok(dir)
}

/// True when the file extension is one the chooser offers.
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_output_dir_uses_fixed_name() {
        assert!(default_output_directory_path().ends_with(OUTPUT_DIR_NAME));
    }

    #[test]
    fn config_path_is_settings_toml() {
        assert_eq!(
            default_config_path().file_name().unwrap(),
            "settings.toml"
        );
    }

    #[test]
    fn resolve_creates_configured_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a").join("b");

        let resolved = resolve_output_directory(&target.to_string_lossy()).unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
        // Second call finds it in place
        assert_eq!(resolve_output_directory(&target.to_string_lossy()).unwrap(), target);
    }

    #[test]
    fn recognizes_media_extensions() {
        assert!(is_media_file(Path::new("/v/clip.MP4")));
        assert!(is_media_file(Path::new("talk.mkv")));
        assert!(!is_media_file(Path::new("notes.txt")));
        assert!(!is_media_file(Path::new("no_extension")));
    }
}
