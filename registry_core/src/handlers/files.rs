use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::{
    error::{AppError, Result},
    registry::StoredFile,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct FileUploadResponse {
    pub success: bool,
    pub filename: String,
    pub size: u64,
}

impl From<StoredFile> for FileUploadResponse {
    fn from(stored: StoredFile) -> Self {
        Self {
            success: true,
            filename: stored.name,
            size: stored.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileDeleteResponse {
    pub success: bool,
}

pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<StoredFile>>> {
    let files = state.registry.list().await?;

    info!("GET /files - {} files", files.len());

    Ok(Json(files))
}

pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<FileUploadResponse>> {
    // A non-multipart request still gets the JSON error shape.
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.to_string()))?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or(AppError::NoFileProvided)?
            .to_string();

        info!("POST /upload - {}", filename);

        let stored = state.registry.store(&filename, field).await?;

        return Ok(Json(stored.into()));
    }

    Err(AppError::NoFileProvided)
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<FileDeleteResponse>> {
    info!("DELETE /files/{}", filename);

    state.registry.delete(&filename).await?;

    Ok(Json(FileDeleteResponse { success: true }))
}
