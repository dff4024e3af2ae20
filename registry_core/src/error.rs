//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot list files: {0}")]
    RegistryUnavailable(String),

    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Upload failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NoFileProvided => {
                (StatusCode::BAD_REQUEST, "No file uploaded".to_string())
            }
            AppError::InvalidName(name) => {
                (StatusCode::BAD_REQUEST, format!("Invalid file name: {}", name))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RegistryUnavailable(msg) => {
                tracing::error!("Registry unavailable: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Cannot list files".to_string())
            }
            AppError::WriteFailed(msg) => {
                tracing::error!("Write failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Upload failed".to_string())
            }
            AppError::DeleteFailed(msg) => {
                tracing::error!("Delete failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Delete failed".to_string())
            }
            AppError::Io(err) => {
                tracing::error!("IO error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
