use chrono::{DateTime, Utc};
use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::session::upload::SurveyFile;

/// Where a session stands, derived from its `UiState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Analyzing,
    Done,
    Failed,
}

/// Transient per-session state. Never persisted.
#[derive(Debug, Default)]
pub struct UiState {
    pub selected_file: Option<SurveyFile>,
    pub result: Option<AnalysisResult>,
    pub is_analyzing: bool,
    pub error_message: Option<String>,
    pub analyzed_at: Option<DateTime<Utc>>,
}

/// Outcome of pressing the analyze trigger.
#[derive(Debug, PartialEq, Eq)]
pub enum Trigger {
    /// A request should be issued for this file.
    Started(SurveyFile),
    /// An analysis is already in flight; nothing happened.
    AlreadyRunning,
    /// No file is selected; a validation message is now displayed.
    NoFile,
}

/// The session state machine. Owns the `UiState` exclusively; every mutation
/// is a user action or the completion of the one in-flight request.
#[derive(Debug, Default)]
pub struct Controller {
    state: UiState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_analyzing {
            Phase::Analyzing
        } else if self.state.result.is_some() {
            Phase::Done
        } else if self.state.error_message.is_some() {
            Phase::Failed
        } else if self.state.selected_file.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Replaces the selected file and clears any previous result or error.
    /// Ignored while an analysis is in flight, matching the disabled picker.
    pub fn select_file(&mut self, file: Option<SurveyFile>) -> bool {
        if self.state.is_analyzing {
            debug!("Ignoring file selection while an analysis is in flight");
            return false;
        }
        self.state.selected_file = file;
        self.state.result = None;
        self.state.error_message = None;
        self.state.analyzed_at = None;
        true
    }

    pub fn begin_analysis(&mut self) -> Trigger {
        if self.state.is_analyzing {
            return Trigger::AlreadyRunning;
        }
        let Some(file) = self.state.selected_file.clone() else {
            self.state.result = None;
            self.state.error_message = Some(AppError::NoFileSelected.user_message());
            return Trigger::NoFile;
        };

        self.state.is_analyzing = true;
        self.state.result = None;
        self.state.error_message = None;
        self.state.analyzed_at = None;
        Trigger::Started(file)
    }

    /// Records the outcome of the in-flight request and clears the flag.
    pub fn finish(&mut self, outcome: Result<AnalysisResult, AppError>) {
        self.state.is_analyzing = false;
        match outcome {
            Ok(result) => {
                self.state.result = Some(result);
                self.state.error_message = None;
                self.state.analyzed_at = Some(Utc::now());
            }
            Err(e) => {
                self.state.result = None;
                self.state.error_message = Some(e.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::scenario_result;
    use crate::analysis::AnalysisError;

    fn file() -> SurveyFile {
        SurveyFile::new("survey.txt", "Loved it 5")
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(Controller::new().phase(), Phase::Idle);
    }

    #[test]
    fn test_select_moves_to_ready() {
        let mut controller = Controller::new();
        assert!(controller.select_file(Some(file())));
        assert_eq!(controller.phase(), Phase::Ready);

        controller.select_file(None);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_analyze_without_file_shows_message() {
        let mut controller = Controller::new();
        assert_eq!(controller.begin_analysis(), Trigger::NoFile);
        assert!(!controller.state().is_analyzing);
        assert_eq!(
            controller.state().error_message.as_deref(),
            Some("Please select a file first.")
        );
        assert_eq!(controller.phase(), Phase::Failed);
    }

    #[test]
    fn test_successful_run_reaches_done() {
        let mut controller = Controller::new();
        controller.select_file(Some(file()));
        assert_eq!(controller.begin_analysis(), Trigger::Started(file()));
        assert_eq!(controller.phase(), Phase::Analyzing);

        controller.finish(Ok(scenario_result()));
        assert_eq!(controller.phase(), Phase::Done);
        assert!(!controller.state().is_analyzing);
        assert!(controller.state().error_message.is_none());
        assert!(controller.state().analyzed_at.is_some());
    }

    #[test]
    fn test_failed_run_reaches_failed_without_result() {
        let mut controller = Controller::new();
        controller.select_file(Some(file()));
        controller.begin_analysis();

        controller.finish(Err(AppError::Analysis(AnalysisError)));
        assert_eq!(controller.phase(), Phase::Failed);
        assert!(!controller.state().is_analyzing);
        assert!(controller.state().result.is_none());
        let message = controller.state().error_message.clone().unwrap();
        assert!(!message.contains("survey analysis failed"));
    }

    #[test]
    fn test_trigger_is_inert_while_in_flight() {
        let mut controller = Controller::new();
        controller.select_file(Some(file()));
        controller.begin_analysis();

        assert_eq!(controller.begin_analysis(), Trigger::AlreadyRunning);
        assert_eq!(controller.phase(), Phase::Analyzing);
    }

    #[test]
    fn test_selection_ignored_while_in_flight() {
        let mut controller = Controller::new();
        controller.select_file(Some(file()));
        controller.begin_analysis();

        assert!(!controller.select_file(None));
        assert_eq!(controller.state().selected_file, Some(file()));
    }

    #[test]
    fn test_new_selection_clears_result_and_error() {
        let mut controller = Controller::new();
        controller.select_file(Some(file()));
        controller.begin_analysis();
        controller.finish(Ok(scenario_result()));

        controller.select_file(Some(SurveyFile::new("other.txt", "3")));
        assert!(controller.state().result.is_none());
        assert!(controller.state().error_message.is_none());
        assert_eq!(controller.phase(), Phase::Ready);

        controller.begin_analysis();
        controller.finish(Err(AppError::FileRead("empty".into())));
        controller.select_file(Some(file()));
        assert!(controller.state().error_message.is_none());
        assert_eq!(controller.phase(), Phase::Ready);
    }
}
