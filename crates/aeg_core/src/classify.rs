//! Maps an [`ExecutionOutcome`] to the alert shown to the user.
//!
//! The exit code is the only success signal. Tool output is shown to the user
//! but never inspected to decide whether a run worked.

use crate::exec::ExecutionOutcome;
use crate::models::AlertState;

/// Operation name used by [`classify`].
pub const DEFAULT_OPERATION: &str = "Export";

/// Classify an outcome of the default "Export" operation.
pub fn classify(outcome: &ExecutionOutcome) -> AlertState {
    classify_operation(outcome, DEFAULT_OPERATION)
}

/// Classify an outcome, naming `operation` in the success message.
pub fn classify_operation(outcome: &ExecutionOutcome, operation: &str) -> AlertState {
    match outcome {
        ExecutionOutcome::Success { .. } => {
            AlertState::success(format!("{} completed successfully", operation))
        }
        ExecutionOutcome::Failure {
            exit_code,
            diagnostic,
        } => {
            let diagnostic = diagnostic.trim();
            if diagnostic.is_empty() {
                AlertState::error(format!(
                    "{} failed: tool exited with code {}",
                    operation, exit_code
                ))
            } else {
                AlertState::error(diagnostic)
            }
        }
        ExecutionOutcome::SpawnError { cause } => AlertState::error(cause.to_string()),
    }
}
