use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// Shared JSON error body. Internal details never reach the client; use-case
/// errors carry their own status via `status_code()`.
pub fn into_error_response(status: StatusCode, err: impl std::fmt::Display) -> Response {
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(ErrorResponse {
            code: status.as_u16(),
            message,
        }),
    )
        .into_response()
}

/// Cross-cutting HTTP errors raised outside the use cases (capability
/// checks, malformed path input).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        into_error_response(status, self)
    }
}
