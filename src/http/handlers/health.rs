//! Liveness endpoint.

use axum::{Json, extract::State};

use super::super::AppState;
use super::super::types::HealthResponse;

/// GET /health - Process is up; reports which store backend is active.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        store: state.store.kind().to_string(),
    })
}
