//! Export session state: the visible alert and the in-flight guard.

use crate::classify::{classify_operation, DEFAULT_OPERATION};
use crate::exec::ExecutionOutcome;
use crate::models::{AlertState, ExportOptions, ValidationError, ValidationResult};

/// State a front-end keeps between export actions.
///
/// Holds at most one alert; every action replaces it wholesale. At most one
/// export is in flight at a time.
#[derive(Debug)]
pub struct ExportSession {
    /// Currently visible alert.
    alert: Option<AlertState>,
    /// An export was started and has not finished.
    in_flight: bool,
    /// Operation name used in success messages.
    operation: String,
}

impl ExportSession {
    pub fn new() -> Self {
        Self {
            alert: None,
            in_flight: false,
            operation: DEFAULT_OPERATION.to_string(),
        }
    }

    /// Name the operation in success messages ("Shotcut MLT export ...").
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    pub fn alert(&self) -> Option<&AlertState> {
        self.alert.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Replace the visible alert.
    pub fn replace_alert(&mut self, alert: AlertState) {
        self.alert = Some(alert);
    }

    /// Hide the alert. Allowed at any time, including mid-export.
    pub fn dismiss(&mut self) {
        self.alert = None;
    }

    /// Start an export.
    ///
    /// A second start while one is running is refused and the visible alert
    /// is left alone. Options without an input file set an error alert and
    /// nothing is marked in flight.
    pub fn begin(&mut self, options: &ExportOptions) -> ValidationResult<()> {
        if self.in_flight {
            tracing::warn!("Export requested while another is running");
            return Err(ValidationError::ExportInFlight);
        }

        if let Err(e) = options.validate() {
            tracing::warn!("Export refused: {}", e);
            self.alert = Some(AlertState::error(e.to_string()));
            return Err(e);
        }

        let file_name = options
            .input_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| options.input_path.display().to_string());

        self.in_flight = true;
        self.alert = Some(AlertState::in_progress(format!(
            "Exporting {} as {}...",
            file_name,
            options.export_format.label()
        )));
        Ok(())
    }

    /// Finish the running export and show its result.
    pub fn finish(&mut self, outcome: &ExecutionOutcome) -> &AlertState {
        self.in_flight = false;
        self.alert.insert(classify_operation(outcome, &self.operation))
    }

    /// End the running export before the tool ran, showing `message`.
    pub fn abort(&mut self, message: impl Into<String>) -> &AlertState {
        self.in_flight = false;
        self.alert.insert(AlertState::error(message))
    }
}

impl Default for ExportSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertKind, ExportFormat};

    fn options() -> ExportOptions {
        ExportOptions::new("/videos/talk.mp4", "/out").with_format(ExportFormat::Shotcut)
    }

    #[test]
    fn begin_sets_in_progress_alert() {
        let mut session = ExportSession::new();
        session.begin(&options()).unwrap();

        assert!(session.is_in_flight());
        let alert = session.alert().unwrap();
        assert_eq!(alert.kind, AlertKind::InProgress);
        assert_eq!(alert.title(), "Processing...");
        assert!(alert.message.contains("talk.mp4"));
        assert!(alert.message.contains("Shotcut MLT"));
    }

    #[test]
    fn missing_input_sets_error_without_starting() {
        let mut session = ExportSession::new();
        let empty = ExportOptions::new("", "/out");

        assert_eq!(session.begin(&empty), Err(ValidationError::NoInputFile));
        assert!(!session.is_in_flight());
        let alert = session.alert().unwrap();
        assert!(alert.is_error());
        assert_eq!(alert.message, "No input file selected");
    }

    #[test]
    fn second_begin_is_refused_while_running() {
        let mut session = ExportSession::new();
        session.begin(&options()).unwrap();

        assert_eq!(
            session.begin(&options()),
            Err(ValidationError::ExportInFlight)
        );
        assert_eq!(session.alert().unwrap().kind, AlertKind::InProgress);
    }

    #[test]
    fn finish_classifies_and_allows_next_export() {
        let mut session = ExportSession::new();
        session.begin(&options()).unwrap();

        let outcome = ExecutionOutcome::from_exit(0, String::new(), "warning".into());
        let alert = session.finish(&outcome).clone();
        assert_eq!(alert, AlertState::success("Export completed successfully"));
        assert!(!session.is_in_flight());

        session.begin(&options()).unwrap();
        let outcome = ExecutionOutcome::from_exit(2, String::new(), "Error! bad file".into());
        assert_eq!(session.finish(&outcome).message, "Error! bad file");
    }

    #[test]
    fn operation_name_flows_into_success() {
        let mut session = ExportSession::new().with_operation("Shotcut export");
        session.begin(&options()).unwrap();
        let outcome = ExecutionOutcome::from_exit(0, String::new(), String::new());
        assert_eq!(
            session.finish(&outcome).message,
            "Shotcut export completed successfully"
        );
    }

    #[test]
    fn abort_shows_error_and_clears_in_flight() {
        let mut session = ExportSession::new();
        session.begin(&options()).unwrap();

        let alert = session.abort("Failed to prepare output directory /out").clone();
        assert!(alert.is_error());
        assert!(!session.is_in_flight());
        assert_eq!(session.alert(), Some(&alert));
        assert!(session.begin(&options()).is_ok());
    }

    #[test]
    fn dismiss_clears_alert_any_time() {
        let mut session = ExportSession::new();
        session.begin(&options()).unwrap();
        session.dismiss();
        assert!(session.alert().is_none());
        assert!(session.is_in_flight());

        session.replace_alert(AlertState::error("boom"));
        assert_eq!(session.alert().unwrap().message, "boom");
    }
}
