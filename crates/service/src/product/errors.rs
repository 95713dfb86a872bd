use thiserror::Error;

use crate::envelope::ErrorEnvelope;

/// Business errors for catalog workflows.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product id is required")]
    MissingId,
    #[error("product id must be a number")]
    InvalidId,
    #[error("product data is required")]
    MissingData,
    #[error("no update fields supplied")]
    MissingUpdateData,
    #[error("product not found")]
    NotFound,
    #[error("failed to fetch products")]
    ListFailed(String),
    #[error("failed to fetch product")]
    FetchFailed(String),
    #[error("failed to create product")]
    CreateFailed(String),
    #[error("failed to update product")]
    UpdateFailed(String),
    #[error("failed to delete product")]
    DeleteFailed(String),
}

impl ProductError {
    /// Stable code surfaced in the error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProductError::MissingId => "MISSING_PRODUCT_ID",
            ProductError::InvalidId => "INVALID_PRODUCT_ID",
            ProductError::MissingData => "MISSING_PRODUCT_DATA",
            ProductError::MissingUpdateData => "MISSING_UPDATE_DATA",
            ProductError::NotFound => "PRODUCT_NOT_FOUND",
            ProductError::ListFailed(_) => "PRODUCTS_FETCH_ERROR",
            ProductError::FetchFailed(_) => "PRODUCT_FETCH_ERROR",
            ProductError::CreateFailed(_) => "PRODUCT_CREATE_ERROR",
            ProductError::UpdateFailed(_) => "PRODUCT_UPDATE_ERROR",
            ProductError::DeleteFailed(_) => "PRODUCT_DELETE_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::MissingId
            | ProductError::InvalidId
            | ProductError::MissingData
            | ProductError::MissingUpdateData => 400,
            ProductError::NotFound => 404,
            ProductError::ListFailed(_)
            | ProductError::FetchFailed(_)
            | ProductError::CreateFailed(_)
            | ProductError::UpdateFailed(_)
            | ProductError::DeleteFailed(_) => 500,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ProductError::ListFailed(detail)
            | ProductError::FetchFailed(detail)
            | ProductError::CreateFailed(detail)
            | ProductError::UpdateFailed(detail)
            | ProductError::DeleteFailed(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.error_code(), self.status_code(), self.to_string(), self.details())
    }
}
