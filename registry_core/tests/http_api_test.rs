use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use registry_core::{create_app, AppState, FileRegistry};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary";

async fn setup_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let registry = FileRegistry::new(temp_dir.path());
    registry.initialize().await.unwrap();

    let app = create_app(AppState::new(registry));
    (app, temp_dir)
}

fn multipart_upload(field_name: &str, filename: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\
         \r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn list(app: &Router) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/files")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, json_body(response).await)
}

#[tokio::test]
async fn test_upload_list_delete_scenario() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = list(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    let response = app
        .clone()
        .oneshot(multipart_upload("file", "a.txt", "hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "a.txt");
    assert_eq!(body["size"], 5);

    let (status, body) = list(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([{"name": "a.txt", "size": 5}]));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/files/a.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    let (status, body) = list(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_overwrites_existing_file() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(multipart_upload("file", "a.txt", "first version"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(multipart_upload("file", "a.txt", "second"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = list(&app).await;
    assert_eq!(body, serde_json::json!([{"name": "a.txt", "size": 6}]));
}

#[tokio::test]
async fn test_upload_larger_than_default_body_limit() {
    let (app, _temp_dir) = setup_test_app().await;

    let contents = "x".repeat(3 * 1024 * 1024);
    let response = app
        .clone()
        .oneshot(multipart_upload("file", "big.bin", &contents))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["size"], 3 * 1024 * 1024);

    let (_, body) = list(&app).await;
    assert_eq!(
        body,
        serde_json::json!([{"name": "big.bin", "size": 3 * 1024 * 1024}])
    );
}

#[tokio::test]
async fn test_upload_without_multipart_body_is_json_error() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upload_without_file_field_is_bad_request() {
    let (app, temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(multipart_upload("attachment", "a.txt", "hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());

    assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

/// App whose registry root is a subdirectory, so traversal by one segment
/// lands in an observable sibling location inside the temp dir.
async fn setup_nested_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let registry = FileRegistry::new(temp_dir.path().join("registry"));
    registry.initialize().await.unwrap();

    let app = create_app(AppState::new(registry));
    (app, temp_dir)
}

#[tokio::test]
async fn test_upload_with_traversal_filename_is_rejected() {
    let (app, temp_dir) = setup_nested_app().await;

    let response = app
        .clone()
        .oneshot(multipart_upload("file", "../escape.txt", "nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());

    assert!(!temp_dir.path().join("escape.txt").exists());
}

#[tokio::test]
async fn test_delete_with_traversal_name_is_rejected() {
    let (app, temp_dir) = setup_nested_app().await;

    let outside = temp_dir.path().join("secret-marker");
    std::fs::write(&outside, b"do not touch").unwrap();

    // %2E%2E%2F decodes to "../" in the path segment.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/files/%2E%2E%2Fsecret-marker")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(outside.exists());
}

#[tokio::test]
async fn test_delete_nonexistent_file_is_server_error() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/files/missing.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}
