use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("movie not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Validation(errors) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let body = json!({
                    "title": "One or more validation errors occurred.",
                    "status": status.as_u16(),
                    "errors": errors,
                });
                (status, Json(body)).into_response()
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                internal_error()
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                internal_error()
            },
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "internal server error" })))
        .into_response()
}

pub type AppResult<T> = Result<T, AppError>;
