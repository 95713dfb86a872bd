//! Boundary-side rendering of classified service errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;
use service::envelope::ErrorEnvelope;
use service::product::errors::ProductError;

/// A classified error envelope ready to render. Anything that is not one of
/// the known business errors goes through [`ApiError::internal`] and leaks no
/// internal detail.
#[derive(Debug)]
pub struct ApiError(pub ErrorEnvelope);

impl ApiError {
    pub fn internal() -> Self {
        ApiError(ErrorEnvelope::internal())
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        ApiError(err.envelope())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err.envelope())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = self.0;
        if envelope.status_code >= 500 {
            error!(code = envelope.error_code, message = %envelope.message, "request failed");
        }
        let status = StatusCode::from_u16(envelope.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(envelope)).into_response()
    }
}
