use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::report::{render_report, SessionPageTemplate};
use crate::session::controller::Controller;
use crate::session::{start_analysis, upload};
use crate::state::AppState;

fn session_path(id: Uuid) -> String {
    format!("/sessions/{id}")
}

/// GET /
pub async fn handle_new_session(State(state): State<AppState>) -> Redirect {
    let id = state.sessions.create().await;
    info!("Created session {id}");
    Redirect::to(&session_path(id))
}

/// GET /sessions/:id
pub async fn handle_session_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let Some(controller) = state.sessions.get(id).await else {
        return Ok(Redirect::to("/").into_response());
    };

    let page = {
        let controller = controller.lock().await;
        page_template(id, &controller)?
    };
    let html = page
        .render()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render page: {e}")))?;
    Ok(Html(html).into_response())
}

/// POST /sessions/:id/file
pub async fn handle_select_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let controller = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let selection = upload::read_selection(multipart).await?;
    if let Some(file) = &selection {
        info!("Session {id}: selected '{}' ({} bytes)", file.name, file.content.len());
    }
    controller.lock().await.select_file(selection);

    Ok(Redirect::to(&session_path(id)))
}

/// POST /sessions/:id/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    let controller = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    if start_analysis(&controller, &state.analyzer).await.is_some() {
        info!("Session {id}: analysis started");
    }

    Ok(Redirect::to(&session_path(id)))
}

fn page_template(id: Uuid, controller: &Controller) -> Result<SessionPageTemplate, AppError> {
    let ui = controller.state();
    let report_html = ui
        .result
        .as_ref()
        .map(render_report)
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render report: {e}")))?;

    Ok(SessionPageTemplate {
        session_id: id.to_string(),
        file_name: ui.selected_file.as_ref().map(|f| f.name.clone()),
        is_analyzing: ui.is_analyzing,
        can_analyze: ui.selected_file.is_some() && !ui.is_analyzing,
        error_message: ui.error_message.clone(),
        report_html,
        analyzed_at: ui
            .analyzed_at
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
    })
}
