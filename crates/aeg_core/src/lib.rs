//! AEG Core - Backend logic for Auto Editor GUI
//!
//! This crate builds auto-editor commands, runs them, and turns the result
//! into a user-facing alert. It has no UI dependencies and can be used by the
//! desktop front-end or a CLI.

pub mod capability;
pub mod classify;
pub mod command;
pub mod config;
pub mod exec;
pub mod logging;
pub mod models;
pub mod paths;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
