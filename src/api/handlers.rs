// src/api/handlers.rs

use crate::api::{auth, types::*, ApiState};
use crate::core::history::{Interaction, InteractionKind};
use crate::core::report;
use crate::core::roi;
use crate::core::session::Dashboard;
use crate::core::toolkit::{AutomationReply, FeatureReply, StoredSession};
use crate::core::types::{AutomationForm, IdeaForm, MeetingForm};
use crate::infra::errors::ToolkitError;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a toolkit error onto an HTTP status and JSON body.
pub fn api_error(e: ToolkitError) -> ApiError {
    let status = match &e {
        ToolkitError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ToolkitError::SessionNotFound(_) | ToolkitError::NoReport(_) => StatusCode::NOT_FOUND,
        ToolkitError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        ToolkitError::Service { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// POST /api/v1/sessions — Start a session with a fresh quota and empty history.
pub async fn create_session(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<SessionCreatedResponse>), ApiError> {
    auth::check_auth(&state, &headers)?;

    let session_id = state.store.create().map_err(api_error)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id,
            max_calls: state.store.max_calls(),
        }),
    ))
}

/// DELETE /api/v1/sessions/{id} — End a session, discarding its history.
pub async fn end_session(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    auth::check_auth(&state, &headers)?;

    state.store.end(&id).map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/{id}/idea — Idea Evaluator.
pub async fn evaluate_idea(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(form): Json<IdeaForm>,
) -> Result<Json<FeatureReply>, ApiError> {
    auth::check_auth(&state, &headers)?;

    let mut slot = StoredSession::new(&state.store, &id);
    let reply = state
        .toolkit
        .evaluate_idea(&mut slot, form)
        .await
        .map_err(api_error)?;
    Ok(Json(reply))
}

/// POST /api/v1/sessions/{id}/meeting — Meeting Checker.
pub async fn check_meeting(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(form): Json<MeetingForm>,
) -> Result<Json<FeatureReply>, ApiError> {
    auth::check_auth(&state, &headers)?;

    let mut slot = StoredSession::new(&state.store, &id);
    let reply = state
        .toolkit
        .check_meeting(&mut slot, form)
        .await
        .map_err(api_error)?;
    Ok(Json(reply))
}

/// POST /api/v1/sessions/{id}/automation — Work Automation Finder.
pub async fn analyze_workload(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(form): Json<AutomationForm>,
) -> Result<Json<AutomationReply>, ApiError> {
    auth::check_auth(&state, &headers)?;

    let mut slot = StoredSession::new(&state.store, &id);
    let reply = state
        .toolkit
        .analyze_workload(&mut slot, form)
        .await
        .map_err(api_error)?;
    Ok(Json(reply))
}

/// GET /api/v1/sessions/{id}/history — Interactions in the order they happened.
pub async fn get_history(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    auth::check_auth(&state, &headers)?;

    let history = state.store.history(&id).map_err(api_error)?;
    Ok(Json(history))
}

/// GET /api/v1/sessions/{id}/dashboard — Counts, automation totals and chart series.
pub async fn get_dashboard(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Dashboard>, ApiError> {
    auth::check_auth(&state, &headers)?;

    let dashboard = state.store.dashboard(&id).map_err(api_error)?;
    Ok(Json(dashboard))
}

/// GET /api/v1/sessions/{id}/reports/{kind} — Plain-text download of the latest result.
pub async fn download_report(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path((id, kind)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    auth::check_auth(&state, &headers)?;

    let kind: InteractionKind = kind
        .parse()
        .map_err(|e: String| api_error(ToolkitError::InvalidInput(e)))?;
    let report = state
        .store
        .with(&id, |s| report::latest(&s.history, kind))
        .and_then(|r| r)
        .map_err(api_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.filename),
            ),
        ],
        report.body,
    ))
}

/// POST /api/v1/roi — Workload and ROI figures without a model call.
pub async fn calculate_roi(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<RoiRequest>,
) -> Result<Json<RoiResponse>, ApiError> {
    auth::check_auth(&state, &headers)?;

    let form = AutomationForm::from(body);
    form.validate().map_err(api_error)?;
    let rows = form.filled_rows();

    Ok(Json(RoiResponse {
        workload: roi::workload_breakdown(&rows),
        roi: roi::calculate(&rows, form.hourly_rate, form.automation_cost),
    }))
}

/// GET /api/v1/health — Simple health check.
pub async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.store.len(),
    }))
}
