use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The controller shows `user_message()` instead; causes are only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("File read error: {0}")]
    FileRead(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The message shown to the end user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NoFileSelected => "Please select a file first.".to_string(),
            AppError::FileRead(_) => "The file could not be read as text.".to_string(),
            AppError::Analysis(_) => "Something went wrong while analyzing the survey data. \
                Check the server log for details or try another file."
                .to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NoFileSelected => (StatusCode::BAD_REQUEST, "NO_FILE_SELECTED"),
            AppError::FileRead(_) => (StatusCode::UNPROCESSABLE_ENTITY, "FILE_READ_ERROR"),
            AppError::Analysis(_) => (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::FileRead(msg) => tracing::warn!("File read error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let (status, code) = self.status_and_code();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NoFileSelected.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FileRead("bad utf-8".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Analysis(AnalysisError).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::NotFound("session".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_user_message_hides_cause() {
        let err = AppError::FileRead("invalid utf-8 sequence of 1 bytes from index 3".into());
        assert!(!err.user_message().contains("utf-8"));

        let err = AppError::Internal(anyhow::anyhow!("connection pool exhausted"));
        assert!(!err.user_message().contains("pool"));
    }

    #[test]
    fn test_no_file_message() {
        assert_eq!(
            AppError::NoFileSelected.user_message(),
            "Please select a file first."
        );
    }
}
