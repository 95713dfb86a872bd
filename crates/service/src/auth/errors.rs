use thiserror::Error;

use crate::envelope::ErrorEnvelope;

/// Business errors for auth workflows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("email already registered")]
    EmailExists,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid password")]
    InvalidPassword,
    #[error("authentication token is required")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("insufficient privileges")]
    Forbidden,
    #[error("failed to create user")]
    CreateFailed(String),
    #[error("token issuing failed")]
    Token(String),
    #[error("unexpected auth failure")]
    Internal(String),
}

impl AuthError {
    /// Stable code surfaced in the error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "INVALID_EMAIL",
            AuthError::EmailExists => "EMAIL_EXISTS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::InvalidPassword => "INVALID_PASSWORD",
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::CreateFailed(_) => "USER_CREATE_ERROR",
            AuthError::Token(_) => "TOKEN_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidEmail | AuthError::EmailExists => 400,
            AuthError::UserNotFound => 404,
            AuthError::InvalidPassword | AuthError::MissingToken | AuthError::InvalidToken => 401,
            AuthError::Forbidden => 403,
            AuthError::CreateFailed(_) | AuthError::Token(_) | AuthError::Internal(_) => 500,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            AuthError::CreateFailed(detail)
            | AuthError::Token(detail)
            | AuthError::Internal(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.error_code(), self.status_code(), self.to_string(), self.details())
    }
}
