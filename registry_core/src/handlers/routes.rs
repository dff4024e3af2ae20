//! HTTP routes for the file registry

use crate::{handlers::files, AppState};
use axum::{
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/files", get(files::list_files))
        // Uploads are streamed to disk, so the in-memory body cap does not
        // apply; payloads of any finite length are accepted.
        .route(
            "/upload",
            post(files::upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/files/:filename", delete(files::delete_file))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "list": "GET /files",
            "upload": "POST /upload",
            "delete": "DELETE /files/{filename}"
        }
    }))
}

async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}
