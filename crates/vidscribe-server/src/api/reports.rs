use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use vidscribe::Report;

use crate::api::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    /// Absent or empty URLs fail validation downstream, so a missing
    /// field surfaces as the same 400 as a malformed one.
    #[serde(default)]
    pub source_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameReportRequest {
    #[serde(default)]
    pub title: String,
}

/// POST /api/reports
pub async fn submit_report(
    State(state): State<AppState>,
    Json(req): Json<SubmitReportRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, Json<serde_json::Value>)> {
    let id = state
        .lifecycle
        .submit(&req.source_url)
        .map_err(error_response)?;

    tracing::info!(report_id = %id, "Report submitted");
    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

/// GET /api/history
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<Report>>, (StatusCode, Json<serde_json::Value>)> {
    let reports = state.lifecycle.list_all().map_err(error_response)?;
    Ok(Json(reports))
}

/// GET /api/report/:id
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>, (StatusCode, Json<serde_json::Value>)> {
    let report = state.lifecycle.get(&id).map_err(error_response)?;
    Ok(Json(report))
}

/// PUT /api/report/:id/title
pub async fn rename_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameReportRequest>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    state
        .lifecycle
        .rename(&id, &req.title)
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/report/:id/duplicate
pub async fn duplicate_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Report>), (StatusCode, Json<serde_json::Value>)> {
    let copy = state.lifecycle.duplicate(&id).map_err(error_response)?;

    tracing::info!(report_id = %id, copy_id = %copy.id, "Report duplicated");
    Ok((StatusCode::CREATED, Json(copy)))
}

/// DELETE /api/report/:id
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    state.lifecycle.delete(&id).map_err(error_response)?;

    tracing::info!(report_id = %id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}
