//! Command building for auto-editor.
//!
//! This module turns export options into a discrete argument vector.
//! Nothing here touches the filesystem or spawns processes.
//!
//! # Architecture
//!
//! - **builder**: Converts `ExportOptions` into a `CommandInvocation`
//! - **invocation**: The immutable argument vector plus display helpers

mod builder;
mod invocation;

pub use builder::{build, output_file_path, CommandBuilder, DEFAULT_TOOL};
pub use invocation::{format_tokens_pretty, CommandInvocation};
