use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::analysis::schema::response_schema;
use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if req.text.is_empty() {
        return Err(AppError::Validation("Survey text must not be empty".to_string()));
    }
    let result = state.analyzer.analyze(&req.text).await?;
    Ok(Json(result))
}

/// GET /api/v1/schema
pub async fn handle_schema() -> Json<Value> {
    Json(response_schema().clone())
}
