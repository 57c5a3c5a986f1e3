//! Error types for launching the export tool.
//!
//! These never escape the bridge as `Err`; they travel inside
//! [`ExecutionOutcome::SpawnError`](super::ExecutionOutcome::SpawnError).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why no tool run could be completed.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The output folder couldn't be created; nothing was launched.
    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The OS refused to start the program (missing, not executable, ...).
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program started but its exit status could not be collected.
    #[error("Lost track of {program} while waiting for it to exit: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child was started without piped output.
    #[error("{program} started without capturable output")]
    MissingPipe { program: String },

    /// The invocation targets something other than the configured tool.
    #[error("Refusing to run {program}: only {allowed} may be launched")]
    ToolNotAllowed { program: String, allowed: String },
}

impl ExecutionError {
    /// Create an output directory error.
    pub fn create_output_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateOutputDir {
            path: path.into(),
            source,
        }
    }

    /// Create a launch error.
    pub fn launch(program: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// Create a wait error.
    pub fn wait(program: impl Into<String>, source: io::Error) -> Self {
        Self::Wait {
            program: program.into(),
            source,
        }
    }

    /// Create a tool-not-allowed error.
    pub fn tool_not_allowed(program: impl Into<String>, allowed: impl Into<String>) -> Self {
        Self::ToolNotAllowed {
            program: program.into(),
            allowed: allowed.into(),
        }
    }

    /// True when the program could not be found at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Launch { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type for bridge internals.
pub type ExecutionResult<T> = Result<T, ExecutionError>;
