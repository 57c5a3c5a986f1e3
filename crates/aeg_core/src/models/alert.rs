//! The single user-facing alert.

use serde::{Deserialize, Serialize};

use super::enums::AlertKind;

/// Status message shown to the user.
///
/// Only one alert is visible at a time. A new action replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    pub kind: AlertKind,
    pub message: String,
}

impl AlertState {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An export has started.
    pub fn in_progress(message: impl Into<String>) -> Self {
        Self::new(AlertKind::InProgress, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }

    /// Title for the alert banner.
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

impl std::fmt::Display for AlertState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.title(), self.message)
    }
}
