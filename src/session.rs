//! View-model driven by a UI.
//!
//! A [`Session`] holds what the user has picked (dataset, rules) next to
//! the controller that runs submissions, and projects both into a single
//! [`UiState`] for rendering.
//!
//! Validation failures never reach the controller: they are kept as a
//! notice beside the controller state, so results on screen stay put when
//! the user, say, clicks "compare" with one rule selected.

use std::sync::Arc;

use tracing::{info, warn};

use crate::client::{ControllerState, ExecutionController, Transport};
use crate::models::{Dataset, FileCandidate, FileIntake, Mode, ResultSet, RuleId, RuleSelection};
use crate::request::{Request, RequestBuilder};
use crate::validation::ValidationError;

/// Everything a view needs to draw, as one value.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    /// Nothing picked, nothing submitted.
    Idle,
    /// Inputs are being assembled; nothing in flight or on display.
    Ready {
        dataset: Option<Dataset>,
        selection: RuleSelection,
    },
    /// Waiting for the service.
    Pending(Request),
    /// Results on display.
    Succeeded(ResultSet),
    /// The last submission failed.
    Failed(String),
}

/// Inputs plus request lifecycle for one user.
pub struct Session {
    intake: FileIntake,
    selection: RuleSelection,
    controller: Arc<ExecutionController>,
    notice: Option<ValidationError>,
}

impl Session {
    /// Creates a session with its own controller.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_controller(Arc::new(ExecutionController::new(transport)))
    }

    /// Creates a session around an existing (possibly shared) controller.
    pub fn with_controller(controller: Arc<ExecutionController>) -> Self {
        Self {
            intake: FileIntake::new(),
            selection: RuleSelection::new(),
            controller,
            notice: None,
        }
    }

    /// Offers a file. A rejected file also drops the previous one.
    pub fn accept_file(&mut self, candidate: Option<FileCandidate>) -> Result<&Dataset, ValidationError> {
        match self.intake.accept(candidate) {
            Ok(dataset) => {
                self.notice = None;
                Ok(dataset)
            }
            Err(e) => {
                self.notice = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Toggles a rule; returns whether it is now selected.
    pub fn toggle(&mut self, rule: RuleId) -> bool {
        self.selection.toggle(rule)
    }

    /// Toggles a rule given by name, rejecting names outside the catalog.
    pub fn toggle_named(&mut self, name: &str) -> Result<bool, ValidationError> {
        let rule: RuleId = name.parse()?;
        Ok(self.toggle(rule))
    }

    /// Selects a rule by catalog name, leaving it selected if it already is.
    pub fn select_named(&mut self, name: &str) -> Result<(), ValidationError> {
        let rule: RuleId = name.parse()?;
        if !self.selection.contains(rule) {
            self.toggle(rule);
        }
        Ok(())
    }

    pub fn selection(&self) -> &RuleSelection {
        &self.selection
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.intake.dataset()
    }

    /// "File uploaded: <name>" once a dataset is held.
    pub fn file_label(&self) -> Option<String> {
        self.dataset().map(|d| format!("File uploaded: {}", d.name()))
    }

    pub fn controller(&self) -> &Arc<ExecutionController> {
        &self.controller
    }

    /// Runs the selected rules individually.
    pub async fn execute(&mut self) -> UiState {
        self.run(Mode::Execute).await
    }

    /// Runs the selected rules and asks for a comparison.
    pub async fn compare(&mut self) -> UiState {
        self.run(Mode::Compare).await
    }

    async fn run(&mut self, mode: Mode) -> UiState {
        match RequestBuilder::build(self.intake.dataset(), &self.selection, mode) {
            Ok(request) => {
                self.notice = None;
                if let Err(e) = self.controller.submit(request).await {
                    warn!(%mode, "submission not sent: {}", e);
                }
            }
            Err(e) => {
                warn!(%mode, kind = ?e.kind, "request not built: {}", e);
                self.notice = Some(e);
            }
        }
        self.ui_state()
    }

    /// Dismisses results: controller back to idle, selection cleared.
    /// The dataset stays.
    pub fn dismiss(&mut self) {
        info!("results dismissed");
        self.controller.reset();
        self.selection.clear();
        self.notice = None;
    }

    /// The message to show, if any: a validation notice takes precedence
    /// over a failed submission.
    pub fn message(&self) -> Option<String> {
        self.notice
            .as_ref()
            .map(|n| n.message.clone())
            .or_else(|| self.controller.state().error_message().map(str::to_string))
    }

    /// Current validation notice.
    pub fn notice(&self) -> Option<&ValidationError> {
        self.notice.as_ref()
    }

    /// Projects inputs and controller state into one [`UiState`].
    pub fn ui_state(&self) -> UiState {
        match self.controller.state() {
            ControllerState::Idle => {
                if self.intake.dataset().is_none() && self.selection.is_empty() {
                    UiState::Idle
                } else {
                    UiState::Ready {
                        dataset: self.intake.dataset().cloned(),
                        selection: self.selection.clone(),
                    }
                }
            }
            ControllerState::Pending(request) => UiState::Pending(request),
            ControllerState::Succeeded(results) => UiState::Succeeded(results),
            ControllerState::Failed(message) => UiState::Failed(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{success_body, ScriptedTransport, CONNECTION_FAILED};
    use crate::models::SPREADSHEET_MIME;
    use crate::validation::ValidationErrorKind;

    fn xlsx() -> Option<FileCandidate> {
        Some(FileCandidate::new(vec![1, 2, 3], SPREADSHEET_MIME, "jobs.xlsx"))
    }

    fn session(transport: &Arc<ScriptedTransport>) -> Session {
        Session::new(transport.clone())
    }

    #[tokio::test]
    async fn test_idle_then_ready() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        assert_eq!(s.ui_state(), UiState::Idle);

        s.toggle(RuleId::Spt);
        match s.ui_state() {
            UiState::Ready { dataset, selection } => {
                assert!(dataset.is_none());
                assert_eq!(selection.as_ordered(), vec![RuleId::Spt]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }

        s.accept_file(xlsx()).unwrap();
        assert_eq!(s.file_label().as_deref(), Some("File uploaded: jobs.xlsx"));
    }

    #[tokio::test]
    async fn test_missing_file_never_hits_network() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        s.toggle(RuleId::Spt);

        s.execute().await;
        assert_eq!(s.notice().unwrap().kind, ValidationErrorKind::MissingFile);
        assert_eq!(s.message().as_deref(), Some("Please upload an Excel file first"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_execute_success() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        s.accept_file(xlsx()).unwrap();
        s.toggle(RuleId::Edd);
        s.toggle(RuleId::Spt);

        match s.execute().await {
            UiState::Succeeded(results) => assert_eq!(results.results.len(), 2),
            other => panic!("expected Succeeded, got {other:?}"),
        }
        assert!(s.message().is_none());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_keeps_results() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        s.accept_file(xlsx()).unwrap();
        s.toggle(RuleId::Spt);
        s.execute().await;

        // One rule is not enough to compare; results stay on screen.
        let state = s.compare().await;
        assert!(matches!(state, UiState::Succeeded(_)));
        assert_eq!(
            s.notice().unwrap().kind,
            ValidationErrorKind::InsufficientRulesForComparison
        );
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_connection_failure_message() {
        let transport = Arc::new(ScriptedTransport::unreachable());
        let mut s = session(&transport);
        s.accept_file(xlsx()).unwrap();
        s.toggle(RuleId::Lpt);

        assert_eq!(s.execute().await, UiState::Failed(CONNECTION_FAILED.into()));
        assert_eq!(s.message().as_deref(), Some(CONNECTION_FAILED));
    }

    #[tokio::test]
    async fn test_dismiss_clears_results_and_selection() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        s.accept_file(xlsx()).unwrap();
        s.toggle(RuleId::Spt);
        s.toggle(RuleId::Edd);
        s.compare().await;

        s.dismiss();
        assert!(s.selection().is_empty());
        assert!(s.controller().state().results().is_none());
        match s.ui_state() {
            UiState::Ready { dataset, selection } => {
                assert_eq!(dataset.unwrap().name(), "jobs.xlsx");
                assert!(selection.is_empty());
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_file_drops_dataset() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        s.accept_file(xlsx()).unwrap();

        let csv = FileCandidate::new(b"job,pj".to_vec(), "text/csv", "jobs.csv");
        let err = s.accept_file(Some(csv)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidFileType);
        assert!(s.dataset().is_none());
        assert_eq!(s.message().as_deref(), Some("Please select a valid Excel file (.xlsx)"));
    }

    #[tokio::test]
    async fn test_toggle_named_rejects_unknown() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        assert!(s.toggle_named("WSPT").unwrap());
        let err = s.toggle_named("CR").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownRule);
        assert_eq!(s.selection().as_ordered(), vec![RuleId::Wspt]);
    }

    #[tokio::test]
    async fn test_select_named_is_idempotent() {
        let transport = Arc::new(ScriptedTransport::replying(200, success_body()));
        let mut s = session(&transport);
        s.accept_file(xlsx()).unwrap();
        for name in ["SPT", "SPT", "EDD", "SPT"] {
            s.select_named(name).unwrap();
        }
        assert_eq!(s.selection().as_ordered(), vec![RuleId::Spt, RuleId::Edd]);
        assert_eq!(
            s.select_named("CR").unwrap_err().kind,
            ValidationErrorKind::UnknownRule
        );

        assert!(matches!(s.execute().await, UiState::Succeeded(_)));
        assert_eq!(transport.calls(), 1);
    }
}
