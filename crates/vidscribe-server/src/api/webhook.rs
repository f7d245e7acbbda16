use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use vidscribe::db::report_repo::CompletionUpdate;

use crate::api::error_response;
use crate::state::AppState;

/// Completion patch posted back by an external processing service. The
/// report id arrives camelCase; result fields use the store's
/// snake_case names. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookUpdateRequest {
    #[serde(rename = "reportId", default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub key_takeaways: Option<Vec<String>>,
    #[serde(default)]
    pub cleaned_transcript: Option<String>,
    #[serde(default)]
    pub original_transcript: Option<String>,
}

/// POST /api/webhook/update-report
///
/// Marks the report COMPLETED with whatever result fields were
/// provided. Reports already in a terminal state are left untouched
/// and still answered with 200, so retried deliveries are harmless.
pub async fn update_report(
    State(state): State<AppState>,
    Json(req): Json<WebhookUpdateRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let report_id = match req.report_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Report ID is required"})),
            ))
        }
    };

    let update = CompletionUpdate {
        title: req.title,
        synopsis: req.synopsis,
        key_takeaways: req.key_takeaways,
        cleaned_transcript: req.cleaned_transcript,
        original_transcript: req.original_transcript,
    };

    let applied = state
        .lifecycle
        .apply_completion(&report_id, update)
        .map_err(error_response)?;

    if applied {
        tracing::info!(report_id = %report_id, "Webhook completion applied");
    } else {
        tracing::debug!(report_id = %report_id, "Webhook completion ignored, already terminal");
    }

    Ok(Json(json!({"message": "Report updated successfully"})))
}
