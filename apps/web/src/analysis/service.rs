use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{build_analysis_prompt, ANALYSIS_TEMPERATURE};
use crate::analysis::schema::{response_schema, validate, SchemaViolation};
use crate::llm_client::{strip_json_fences, CompletionRequest, CompletionService, LlmError};

/// Opaque failure of a survey analysis. The cause is logged where it happens
/// and never reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("survey analysis failed")]
pub struct AnalysisError;

/// Internal failure detail, logged and then collapsed into `AnalysisError`.
#[derive(Debug, Error)]
enum AnalysisFailure {
    #[error("completion call failed: {0}")]
    Completion(#[from] LlmError),

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response does not match the declared schema: {}", join_violations(.0))]
    Schema(Vec<SchemaViolation>),

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Turns survey text into an `AnalysisResult` through one completion call.
/// Constructed once at startup with the completion backend injected.
#[derive(Clone)]
pub struct SurveyAnalyzer {
    completion: Arc<dyn CompletionService>,
}

impl SurveyAnalyzer {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub fn model(&self) -> &str {
        self.completion.model()
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        info!(
            "Analyzing survey data ({} bytes, model: {})",
            text.len(),
            self.completion.model()
        );

        match self.try_analyze(text).await {
            Ok(result) => {
                for gap in result.soft_expectation_gaps() {
                    debug!("Accepting analysis with soft expectation unmet: {gap}");
                }
                Ok(result)
            }
            Err(e) => {
                error!("Error calling the completion service or parsing its response: {e}");
                Err(AnalysisError)
            }
        }
    }

    async fn try_analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisFailure> {
        let prompt = build_analysis_prompt(text);
        let schema = response_schema();

        let raw = self
            .completion
            .complete_json(CompletionRequest {
                prompt: &prompt,
                response_schema: schema,
                temperature: ANALYSIS_TEMPERATURE,
            })
            .await?;

        parse_analysis(&raw, schema)
    }
}

/// Parses and validates raw completion text. The response is untrusted:
/// it must match the declared schema before it becomes a typed result.
fn parse_analysis(raw: &str, schema: &Value) -> Result<AnalysisResult, AnalysisFailure> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;

    validate(&value, schema).map_err(AnalysisFailure::Schema)?;

    let summary = value
        .get("overallSummary")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if summary.trim().is_empty() {
        return Err(AnalysisFailure::MissingField("overallSummary"));
    }

    Ok(serde_json::from_value(value)?)
}
