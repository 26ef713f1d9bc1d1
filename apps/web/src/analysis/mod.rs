// Survey analysis: prompt, declared response schema, validation, and the
// single remote round trip that turns survey text into an `AnalysisResult`.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod service;

pub use models::AnalysisResult;
pub use service::{AnalysisError, SurveyAnalyzer};
