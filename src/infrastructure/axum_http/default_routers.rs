use axum::{http::StatusCode, response::IntoResponse};
use tracing::info;

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "API route not found").into_response()
}

pub async fn health_check() -> impl IntoResponse {
    info!("router: health_check handler invoked");
    (StatusCode::OK, "OK").into_response()
}
