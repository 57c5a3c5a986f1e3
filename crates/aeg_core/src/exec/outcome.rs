//! Terminal result of one tool run.

use serde::Serialize;

use crate::models::OutputStream;

use super::errors::ExecutionError;

/// One line of tool output, CR/LF stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            text: text.into(),
        }
    }

    pub fn is_stderr(&self) -> bool {
        self.stream == OutputStream::Stderr
    }
}

/// How a tool run ended.
///
/// Success is decided by the exit code alone.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// Exit code 0. `stdout` holds the retained tail of standard output.
    Success { exit_code: i32, stdout: String },
    /// Non-zero exit (-1 when killed by a signal). `diagnostic` holds the
    /// stderr tail, or the stdout tail when stderr was empty.
    Failure { exit_code: i32, diagnostic: String },
    /// Nothing ran to completion.
    SpawnError { cause: ExecutionError },
}

impl ExecutionOutcome {
    /// Classify a finished process by exit code.
    pub fn from_exit(exit_code: i32, stdout_tail: String, stderr_tail: String) -> Self {
        if exit_code == 0 {
            return Self::Success {
                exit_code,
                stdout: stdout_tail,
            };
        }

        let diagnostic = if stderr_tail.trim().is_empty() {
            stdout_tail
        } else {
            stderr_tail
        };
        Self::Failure {
            exit_code,
            diagnostic,
        }
    }

    pub fn spawn_error(cause: ExecutionError) -> Self {
        Self::SpawnError { cause }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Exit code, when a process actually exited.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Success { exit_code, .. } | Self::Failure { exit_code, .. } => Some(*exit_code),
            Self::SpawnError { .. } => None,
        }
    }
}

impl std::fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success { .. } => write!(f, "exited successfully"),
            Self::Failure { exit_code, .. } => write!(f, "exited with code {}", exit_code),
            Self::SpawnError { cause } => write!(f, "did not run: {}", cause),
        }
    }
}
