//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::multipart::MultipartError,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Malformed or oversized upload; carries its own status.
  #[error("invalid multipart body: {0}")]
  Multipart(#[from] MultipartError),

  #[error(transparent)]
  Core(#[from] gatewatch_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Multipart(e) => (e.status(), e.body_text()),
      ApiError::Core(e @ gatewatch_core::Error::Validation(_)) => {
        (StatusCode::BAD_REQUEST, e.to_string())
      }
      ApiError::Core(e @ gatewatch_core::Error::StoreUnavailable(_)) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
