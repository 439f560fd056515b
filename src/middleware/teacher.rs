use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{error::AppError, models::teacher::Teacher, AppState};

#[derive(Debug, Deserialize)]
struct CredentialQuery {
    teacher_username: Option<String>,
}

/// Extractor that resolves the `teacher_username` query parameter to a known teacher.
pub struct TeacherAuth(pub Teacher);

impl FromRequestParts<AppState> for TeacherAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(credential) = Query::<CredentialQuery>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::InvalidQuery(e.body_text()))?;
        let username = credential.teacher_username;

        let teacher = state
            .announcements
            .authenticate(username.as_deref())
            .await?;

        Ok(TeacherAuth(teacher))
    }
}
