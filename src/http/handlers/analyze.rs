//! Upload handler.
//!
//! Reads one photo from the `plantPhoto` multipart field, stores it, draws a
//! mock diagnosis and persists the combined record.

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use tracing::info;

use super::super::types::AnalyzeResponse;
use super::super::{AppError, AppState, metrics};
use crate::constants::{FALLBACK_MIME_TYPE, UPLOAD_FIELD};
use crate::diagnosis::{self, Diagnosis};
use crate::store::NewRecord;
use crate::uploads::Upload;

/// POST /api/analyze - Diagnose an uploaded plant photo.
///
/// A request that is not multipart at all is treated like one without a
/// photo.
pub(crate) async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    metrics::record_request("analyze");

    let mut multipart = multipart.map_err(|_| AppError::missing_file())?;
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(AppError::missing_file)?;

    let filename = state
        .uploads
        .save(&upload)
        .await
        .map_err(|e| AppError::persistence("Upload storage error", e))?;

    let diagnosis = diagnosis::generate(state.rng.as_ref());
    let new_record = NewRecord::new(upload.meta(filename.clone()), diagnosis);

    let record = match state.store.create(new_record).await {
        Ok(record) => record,
        Err(e) => {
            metrics::record_store_error("create");
            if let Some(filename) = &filename {
                state.uploads.discard(filename).await;
            }
            return Err(AppError::persistence("Database save error", e));
        },
    };

    metrics::record_analysis(&record.diagnosis_label);
    info!(
        image_id = %record.id,
        original_name = %record.original_name,
        size = record.size_bytes,
        label = %record.diagnosis_label,
        confidence = %record.confidence,
        "Photo analyzed"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        diagnosis: Diagnosis {
            label: record.diagnosis_label,
            treatment: record.treatment,
            confidence: record.confidence,
        },
        image_id: record.id,
    }))
}

/// Drains the multipart stream and returns the single photo, if any.
///
/// Text fields are ignored. A file under any other field name, or a second
/// photo, is rejected.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let name = field.name().unwrap_or_default().to_string();
        if name != UPLOAD_FIELD || upload.is_some() {
            return Err(AppError::BadRequest(format!("Unexpected field '{name}'")));
        }

        let mime_type = field
            .content_type()
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        upload = Some(Upload {
            original_name,
            mime_type,
            data,
        });
    }

    Ok(upload)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}
