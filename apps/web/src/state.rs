use crate::analysis::SurveyAnalyzer;
use crate::config::Config;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Built once at startup around the configured completion backend.
    pub analyzer: SurveyAnalyzer,
}
