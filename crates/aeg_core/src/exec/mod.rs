//! Execution of the export tool.
//!
//! # Architecture
//!
//! - **bridge**: Spawns one child per invocation and streams its output
//! - **outcome**: The terminal `ExecutionOutcome` and streamed `OutputLine`s
//! - **errors**: Why a run never completed (`ExecutionError`)
//! - **tail**: Bounded buffer of recent output lines
//!
//! Every failure at this boundary is returned as an `ExecutionOutcome` value.

mod bridge;
mod errors;
mod outcome;
mod tail;

pub use bridge::{ExecutionBridge, DEFAULT_TAIL_LINES};
pub use errors::{ExecutionError, ExecutionResult};
pub use outcome::{ExecutionOutcome, OutputLine};
pub use tail::TailBuffer;
