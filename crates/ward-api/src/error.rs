//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is recovered at the request boundary and serialised as
//! `{"error": "<detail>"}` with the status implied by the taxonomy:
//! 400 for field-constraint violations, 404 for missing ids, 500 for
//! backend faults.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation error: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(String),
}

impl From<ward_core::Error> for ApiError {
  fn from(e: ward_core::Error) -> Self {
    match &e {
      ward_core::Error::PatientNotFound(_) => ApiError::NotFound(e.to_string()),
      ward_core::Error::Storage(_) => ApiError::Store(e.to_string()),
      _ if e.is_validation() => ApiError::Validation(e.to_string()),
      _ => ApiError::Store(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
