use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required for this action")]
    AuthenticationRequired,
    #[error("Invalid teacher credentials")]
    InvalidCredential,
    #[error("Invalid announcement ID format")]
    InvalidId,
    #[error("Invalid date format. Use ISO format (YYYY-MM-DDTHH:MM:SS)")]
    InvalidDate,
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Announcement not found")]
    NotFound,
    #[error("Failed to update announcement")]
    UpdateFailed,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationRequired | AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::InvalidId
            | AppError::InvalidDate
            | AppError::InvalidQuery(_)
            | AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UpdateFailed | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Internal server error".to_string()
            }
            AppError::UpdateFailed => {
                tracing::error!("Update matched no announcement after existence check");
                self.to_string()
            }
            other => {
                tracing::debug!(status = %status, message = %other, "Request rejected");
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
