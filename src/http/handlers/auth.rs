//! Mock auth handlers.
//!
//! Both endpoints accept any credentials that carry an email and a password
//! and hand back a fabricated token. Nothing is stored.

use axum::{Json, extract::State};

use super::super::extract::CredentialsBody;
use super::super::types::AuthResponse;
use super::super::{AppError, AppState, metrics};
use crate::auth::fabricate_token;

/// POST /api/register - Echo the user back with a demo token.
pub(crate) async fn register(
    State(state): State<AppState>,
    CredentialsBody(credentials): CredentialsBody,
) -> Result<Json<AuthResponse>, AppError> {
    metrics::record_request("register");
    let user = credentials
        .validate()
        .map_err(AppError::Validation)?
        .registered_user();

    Ok(Json(AuthResponse {
        success: true,
        token: fabricate_token(state.rng.as_ref()),
        user,
    }))
}

/// POST /api/login - Accept any credentials as the demo user.
pub(crate) async fn login(
    State(state): State<AppState>,
    CredentialsBody(credentials): CredentialsBody,
) -> Result<Json<AuthResponse>, AppError> {
    metrics::record_request("login");
    let user = credentials
        .validate()
        .map_err(AppError::Validation)?
        .logged_in_user();

    Ok(Json(AuthResponse {
        success: true,
        token: fabricate_token(state.rng.as_ref()),
        user,
    }))
}
