//! The narrow set of host operations a front-end may perform.
//!
//! Front-ends get file choosers, the default output folder, and the ability
//! to run an export. There is no general "run this command" entry point:
//! [`ToolRunner`] refuses any invocation that doesn't target the configured
//! tool.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::command::CommandInvocation;
use crate::config::{Settings, ToolSettings};
use crate::exec::{ExecutionBridge, ExecutionError, ExecutionOutcome, OutputLine};
use crate::logging::ExportLogger;
use crate::paths;

/// Errors from host capabilities.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CapabilityError {
    /// Create an output directory error.
    pub fn output_directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputDirectory {
            path: path.into(),
            source,
        }
    }
}

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Host operations exposed to the presentation layer.
#[async_trait]
pub trait ExportCapabilities: Send + Sync {
    /// Ask the user for a media file. `None` when cancelled.
    async fn select_input_file(&self) -> Option<PathBuf>;

    /// Ask the user for a folder. `None` when cancelled.
    async fn select_output_directory(&self) -> Option<PathBuf>;

    /// Per-user output folder, created if absent.
    async fn default_output_directory(&self) -> CapabilityResult<PathBuf>;

    /// Run an invocation of the configured tool.
    async fn run_export(&self, invocation: &CommandInvocation) -> ExecutionOutcome;
}

/// Resolve the configured output folder, creating it if needed.
pub fn prepare_output_directory(configured: &str) -> CapabilityResult<PathBuf> {
    paths::resolve_output_directory(configured).map_err(|source| {
        let path = if configured.trim().is_empty() {
            paths::default_output_directory_path()
        } else {
            PathBuf::from(configured)
        };
        CapabilityError::output_directory(path, source)
    })
}

/// Runs invocations of one configured tool and nothing else.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    tool: ToolSettings,
    bridge: ExecutionBridge,
}

impl ToolRunner {
    pub fn new(tool: ToolSettings, bridge: ExecutionBridge) -> Self {
        Self { tool, bridge }
    }

    /// Runner for the `[tool]` section, keeping `[logging] error_tail` lines.
    pub fn from_settings(settings: &Settings) -> Self {
        let bridge = ExecutionBridge::new().with_tail_lines(settings.logging.error_tail as usize);
        Self::new(settings.tool.clone(), bridge)
    }

    pub fn tool(&self) -> &ToolSettings {
        &self.tool
    }

    /// True when the invocation launches the configured program with its
    /// configured prefix arguments.
    pub fn is_allowed(&self, invocation: &CommandInvocation) -> bool {
        invocation.program() == self.tool.effective_program()
            && invocation.args().starts_with(&self.tool.prefix_args)
    }

    /// Run the invocation, passing each output line to `on_output`.
    pub async fn run<F>(&self, invocation: &CommandInvocation, on_output: F) -> ExecutionOutcome
    where
        F: FnMut(&OutputLine),
    {
        if !self.is_allowed(invocation) {
            tracing::error!(
                "Refusing to run {} (configured tool is {})",
                invocation.program(),
                self.tool.effective_program()
            );
            return ExecutionOutcome::spawn_error(ExecutionError::tool_not_allowed(
                invocation.program(),
                self.tool.effective_program(),
            ));
        }

        self.bridge.execute_with(invocation, on_output).await
    }

    /// Like [`run`](Self::run), also recording the run in `logger`.
    ///
    /// On failure the retained output tail is written to the log.
    pub async fn run_logged<F>(
        &self,
        invocation: &CommandInvocation,
        logger: &ExportLogger,
        mut on_output: F,
    ) -> ExecutionOutcome
    where
        F: FnMut(&OutputLine),
    {
        logger.phase(&format!("Export ({})", invocation.format().label()));
        logger.command(&invocation.preview());

        let outcome = self
            .run(invocation, |line| {
                logger.output_line(line);
                on_output(line);
            })
            .await;

        match &outcome {
            ExecutionOutcome::Success { .. } => {
                logger.success(&format!("Wrote {}", invocation.output_path().display()));
            }
            ExecutionOutcome::Failure { exit_code, .. } => {
                logger.error(&format!(
                    "{} exited with code {}",
                    invocation.program(),
                    exit_code
                ));
                logger.show_tail(invocation.program());
            }
            ExecutionOutcome::SpawnError { cause } => logger.error(&cause.to_string()),
        }
        logger.flush();

        outcome
    }
}
