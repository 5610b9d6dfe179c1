//! Custom extractors.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use std::convert::Infallible;

use crate::auth::Credentials;

/// Credentials read from a JSON or URL-encoded form body.
///
/// Never rejects: a missing, unsupported or malformed body yields empty
/// credentials, which then fail the presence check with the usual 400.
#[derive(Debug)]
pub(crate) struct CredentialsBody(pub Credentials);

impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let credentials = if content_type.starts_with("application/json") {
            Json::<Credentials>::from_request(req, state)
                .await
                .map(|Json(c)| c)
                .ok()
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            Form::<Credentials>::from_request(req, state)
                .await
                .map(|Form(c)| c)
                .ok()
        } else {
            None
        };

        Ok(Self(credentials.unwrap_or_default()))
    }
}
