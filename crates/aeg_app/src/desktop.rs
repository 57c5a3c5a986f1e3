//! Host capabilities backed by native dialogs and the local tool.

use std::path::PathBuf;

use aeg_core::capability::{
    prepare_output_directory, CapabilityResult, ExportCapabilities, ToolRunner,
};
use aeg_core::command::CommandInvocation;
use aeg_core::config::Settings;
use aeg_core::exec::{ExecutionOutcome, OutputLine};
use aeg_core::logging::ExportLogger;
use aeg_core::paths::MEDIA_EXTENSIONS;
use async_trait::async_trait;

/// Capabilities for the desktop front-end.
pub struct DesktopCapabilities {
    runner: ToolRunner,
    output_folder: String,
    logger: Option<ExportLogger>,
}

impl DesktopCapabilities {
    pub fn new(settings: &Settings) -> Self {
        Self {
            runner: ToolRunner::from_settings(settings),
            output_folder: settings.paths.output_folder.clone(),
            logger: None,
        }
    }

    /// Record the next export in `logger`.
    pub fn with_logger(mut self, logger: ExportLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn logger(&self) -> Option<&ExportLogger> {
        self.logger.as_ref()
    }
}

#[async_trait]
impl ExportCapabilities for DesktopCapabilities {
    async fn select_input_file(&self) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title("Select Media File")
            .add_filter("Media Files", MEDIA_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file()
            .await
            .map(|f| f.path().to_path_buf())
    }

    async fn select_output_directory(&self) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title("Select Output Directory")
            .pick_folder()
            .await
            .map(|f| f.path().to_path_buf())
    }

    async fn default_output_directory(&self) -> CapabilityResult<PathBuf> {
        prepare_output_directory(&self.output_folder)
    }

    async fn run_export(&self, invocation: &CommandInvocation) -> ExecutionOutcome {
        match &self.logger {
            Some(logger) => {
                self.runner
                    .run_logged(invocation, logger, print_output_line)
                    .await
            }
            None => self.runner.run(invocation, print_output_line).await,
        }
    }
}

/// Echo tool output to the matching terminal stream.
fn print_output_line(line: &OutputLine) {
    if line.is_stderr() {
        eprintln!("{}", line.text);
    } else {
        println!("{}", line.text);
    }
}
