//! Listing handler.

use axum::{Json, extract::State};

use super::super::types::ImagesResponse;
use super::super::{AppError, AppState, metrics};

/// GET /api/images - All diagnosis records, newest first.
pub(crate) async fn list_images(
    State(state): State<AppState>,
) -> Result<Json<ImagesResponse>, AppError> {
    metrics::record_request("images");
    let images = state
        .store
        .find_all_sorted_by_date_desc()
        .await
        .map_err(|e| {
            metrics::record_store_error("find_all");
            AppError::persistence("Database fetch error", e)
        })?;

    Ok(Json(ImagesResponse {
        success: true,
        images,
    }))
}
