//! Uniform success/error envelope shared by every service operation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success wrapper: `{message, statusCode, data, successCode, isSuccess}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSuccess<T> {
    pub message: String,
    pub status_code: u16,
    pub data: T,
    pub success_code: &'static str,
    pub is_success: bool,
}

impl<T> ApiSuccess<T> {
    pub fn new(success_code: &'static str, status_code: u16, message: &str, data: T) -> Self {
        Self { message: message.to_owned(), status_code, data, success_code, is_success: true }
    }

    pub fn ok(success_code: &'static str, message: &str, data: T) -> Self {
        Self::new(success_code, 200, message, data)
    }

    pub fn created(success_code: &'static str, message: &str, data: T) -> Self {
        Self::new(success_code, 201, message, data)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Error wrapper: `{message, statusCode, errorCode, details?, isOperational}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub message: String,
    pub status_code: u16,
    pub error_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub is_operational: bool,
}

impl ErrorEnvelope {
    pub fn new(
        error_code: &'static str,
        status_code: u16,
        message: String,
        details: Option<String>,
    ) -> Self {
        Self { message, status_code, error_code, details, is_operational: true }
    }

    /// Generic 500 used for anything unclassified; carries no internal detail.
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", 500, "internal server error".to_string(), None)
    }
}
