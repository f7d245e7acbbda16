pub mod reports;
pub mod webhook;

use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use vidscribe::LifecycleError;

/// Maps controller errors onto HTTP responses. Validation problems and
/// missing ids carry their message through; store failures are logged
/// and collapsed to a generic 500 body.
pub(crate) fn error_response(err: LifecycleError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        LifecycleError::Validation { message } => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": message})))
        }
        LifecycleError::NotFound { id } => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("Report '{}' not found", id)})),
        ),
        LifecycleError::Database(e) => {
            tracing::error!(error = %e, "Report store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Database error"})),
            )
        }
    }
}
