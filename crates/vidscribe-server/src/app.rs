use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::state::AppState;

/// Assembles the HTTP application. CORS is wide open so browser clients
/// on any origin can submit and poll.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/reports", post(api::reports::submit_report))
        .route("/api/history", get(api::reports::list_history))
        .route(
            "/api/report/:id",
            get(api::reports::get_report).delete(api::reports::delete_report),
        )
        .route("/api/report/:id/title", put(api::reports::rename_report))
        .route(
            "/api/report/:id/duplicate",
            post(api::reports::duplicate_report),
        )
        .route("/api/webhook/update-report", post(api::webhook::update_report))
        .with_state(state)
        .layer(cors)
}
