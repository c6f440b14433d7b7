use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mealshare_shopping::PdfError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Report rendering error: {0}")]
    Report(#[from] PdfError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action".to_string(),
            ),
            AppError::Database(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, "record not found".to_string())
            }
            AppError::Database(e) => {
                tracing::error!(err = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Report(e) => {
                tracing::error!(err = %e, "shopping list report rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred while rendering the report.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
