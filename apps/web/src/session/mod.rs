// Browser sessions: one controller per session, the upload surface, and the
// sequential read-then-analyze run that drives a controller to Done or Failed.

pub mod controller;
pub mod handlers;
pub mod store;
pub mod upload;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::analysis::{AnalysisResult, SurveyAnalyzer};
use crate::errors::AppError;

pub use controller::{Controller, Phase, Trigger};
pub use store::{SessionStore, SharedController};
pub use upload::SurveyFile;

/// Presses the analyze trigger. When a run starts it is spawned so it
/// completes even if the browser goes away; the handle resolves to the
/// final phase. Returns `None` when the trigger was inert or had no file.
pub async fn start_analysis(
    controller: &SharedController,
    analyzer: &SurveyAnalyzer,
) -> Option<JoinHandle<Phase>> {
    let trigger = controller.lock().await.begin_analysis();
    match trigger {
        Trigger::Started(file) => Some(tokio::spawn(run_analysis(
            controller.clone(),
            file,
            analyzer.clone(),
        ))),
        Trigger::AlreadyRunning | Trigger::NoFile => None,
    }
}

/// Reads the file, calls the analyzer, and records the outcome. The
/// controller lock is not held while the request is in flight.
pub async fn run_analysis(
    controller: SharedController,
    file: SurveyFile,
    analyzer: SurveyAnalyzer,
) -> Phase {
    let outcome = analyze_file(&file, &analyzer).await;

    let mut controller = controller.lock().await;
    controller.finish(outcome);
    controller.phase()
}

async fn analyze_file(
    file: &SurveyFile,
    analyzer: &SurveyAnalyzer,
) -> Result<AnalysisResult, AppError> {
    let text = file.read_text().map_err(|e| {
        warn!("{e}");
        e
    })?;
    Ok(analyzer.analyze(&text).await?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;
    use crate::analysis::fixtures::{SCENARIO_RESPONSE, SCENARIO_SURVEY};
    use crate::llm_client::testing::StubCompletion;

    fn shared() -> SharedController {
        Arc::new(Mutex::new(Controller::new()))
    }

    #[tokio::test]
    async fn test_no_file_issues_no_request() {
        let stub = Arc::new(StubCompletion::replying(SCENARIO_RESPONSE));
        let analyzer = SurveyAnalyzer::new(stub.clone());
        let controller = shared();

        assert!(start_analysis(&controller, &analyzer).await.is_none());
        assert_eq!(stub.calls(), 0);
        assert_eq!(
            controller.lock().await.state().error_message.as_deref(),
            Some("Please select a file first.")
        );
    }

    #[tokio::test]
    async fn test_valid_response_reaches_done() {
        let stub = Arc::new(StubCompletion::replying(SCENARIO_RESPONSE));
        let analyzer = SurveyAnalyzer::new(stub.clone());
        let controller = shared();
        controller
            .lock()
            .await
            .select_file(Some(SurveyFile::new("survey.txt", SCENARIO_SURVEY)));

        let handle = start_analysis(&controller, &analyzer).await.unwrap();
        assert_eq!(handle.await.unwrap(), Phase::Done);

        let controller = controller.lock().await;
        assert!(controller.state().result.is_some());
        assert!(controller.state().error_message.is_none());
        assert!(!controller.state().is_analyzing);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_response_reaches_failed() {
        let stub = Arc::new(StubCompletion::replying("{\"keyStrengths\": []}"));
        let analyzer = SurveyAnalyzer::new(stub);
        let controller = shared();
        controller
            .lock()
            .await
            .select_file(Some(SurveyFile::new("survey.txt", SCENARIO_SURVEY)));

        let handle = start_analysis(&controller, &analyzer).await.unwrap();
        assert_eq!(handle.await.unwrap(), Phase::Failed);

        let controller = controller.lock().await;
        assert!(controller.state().result.is_none());
        assert!(!controller.state().is_analyzing);
        assert_eq!(
            controller.state().error_message,
            Some(AppError::Analysis(crate::analysis::AnalysisError).user_message())
        );
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_before_request() {
        let stub = Arc::new(StubCompletion::replying(SCENARIO_RESPONSE));
        let analyzer = SurveyAnalyzer::new(stub.clone());
        let controller = shared();
        controller
            .lock()
            .await
            .select_file(Some(SurveyFile::new("binary.bin", vec![0xffu8, 0xfe, 0x00])));

        let handle = start_analysis(&controller, &analyzer).await.unwrap();
        assert_eq!(handle.await.unwrap(), Phase::Failed);
        assert_eq!(stub.calls(), 0);
        assert_eq!(
            controller.lock().await.state().error_message.as_deref(),
            Some("The file could not be read as text.")
        );
    }

    #[tokio::test]
    async fn test_trigger_inert_while_in_flight() {
        let stub = Arc::new(StubCompletion::replying(SCENARIO_RESPONSE));
        let analyzer = SurveyAnalyzer::new(stub.clone());
        let controller = shared();
        {
            let mut c = controller.lock().await;
            c.select_file(Some(SurveyFile::new("survey.txt", SCENARIO_SURVEY)));
            assert!(matches!(c.begin_analysis(), Trigger::Started(_)));
        }

        assert!(start_analysis(&controller, &analyzer).await.is_none());
        assert_eq!(stub.calls(), 0);
        assert_eq!(controller.lock().await.phase(), Phase::Analyzing);
    }
}
