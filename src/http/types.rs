//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::auth::SessionUser;
use crate::diagnosis::Diagnosis;
use crate::store::DiagnosisRecord;

/// Response for POST /api/register and POST /api/login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: SessionUser,
}

/// Response for POST /api/analyze.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub diagnosis: Diagnosis,
    #[serde(rename = "imageId")]
    pub image_id: String,
}

/// Response for GET /api/images.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub success: bool,
    pub images: Vec<DiagnosisRecord>,
}

/// Response for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Active record store backend (`memory`, `redb`, `unavailable`).
    pub store: String,
}
