use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use core_view::SelectionError;
use serde_json::json;

/// Handler error: an `anyhow` chain plus the status it maps to.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn new(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, anyhow::anyhow!(message.into()))
    }

    /// The dataset is not available; the client may retry the load.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            anyhow::anyhow!(message.into()),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn selection(err: SelectionError) -> Self {
        let status = match err {
            SelectionError::Unknown(_) => StatusCode::NOT_FOUND,
            SelectionError::NotVisible(_) => StatusCode::CONFLICT,
        };
        Self::new(status, err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.to_string(),
            "retryable": self.status == StatusCode::SERVICE_UNAVAILABLE,
        });
        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::new(StatusCode::BAD_REQUEST, err)
    }
}
