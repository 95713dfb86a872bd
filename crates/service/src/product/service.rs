use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};

use models::product::{NewProduct, Product, ProductPatch};

use super::errors::ProductError;
use super::repository::ProductRepository;
use crate::envelope::ApiSuccess;
use crate::query;

/// Catalog business service, independent of the web framework.
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// List products matching the raw query-string parameters. `random=true`
    /// swaps pagination for uniform sampling of `limit` documents.
    #[instrument(skip(self, raw))]
    pub async fn list(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<ApiSuccess<Vec<Product>>, ProductError> {
        let q = query::normalize(raw);
        let products = if q.options.random {
            self.repo.sample_random(&q.filter, q.options.limit).await
        } else {
            self.repo.find_many(&q.filter, &q.options).await
        }
        .map_err(|e| ProductError::ListFailed(e.to_string()))?;
        Ok(ApiSuccess::ok("PRODUCTS_FETCHED", "products fetched", products))
    }

    pub async fn get(&self, id: Option<&str>) -> Result<ApiSuccess<Product>, ProductError> {
        let raw = id.ok_or(ProductError::MissingId)?;
        // A non-numeric id cannot match any document, so it reads as a miss
        // here rather than a format error.
        let Ok(id) = raw.trim().parse::<i64>() else {
            return Err(ProductError::NotFound);
        };
        let product = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| ProductError::FetchFailed(e.to_string()))?
            .ok_or(ProductError::NotFound)?;
        Ok(ApiSuccess::ok("PRODUCT_FETCHED", "product fetched", product))
    }

    #[instrument(skip(self, data))]
    pub async fn create(
        &self,
        data: Option<NewProduct>,
    ) -> Result<ApiSuccess<Product>, ProductError> {
        let data = data.ok_or(ProductError::MissingData)?;
        let max = self
            .repo
            .max_id()
            .await
            .map_err(|e| ProductError::CreateFailed(e.to_string()))?;
        // Read-then-write id assignment: a concurrent creation computing the
        // same id trips the unique index and fails loudly instead of
        // colliding silently.
        let product = data.into_product(max + 1);
        let created = self
            .repo
            .insert(product)
            .await
            .map_err(|e| ProductError::CreateFailed(e.to_string()))?;
        info!(id = created.id, "product_created");
        Ok(ApiSuccess::created("PRODUCT_CREATED", "product created", created))
    }

    pub async fn update(
        &self,
        id: Option<&str>,
        patch: Option<ProductPatch>,
    ) -> Result<ApiSuccess<Product>, ProductError> {
        let id = parse_id(id)?;
        let patch = patch.filter(|p| !p.is_empty()).ok_or(ProductError::MissingUpdateData)?;
        let updated = self
            .repo
            .update(id, &patch)
            .await
            .map_err(|e| ProductError::UpdateFailed(e.to_string()))?
            .ok_or(ProductError::NotFound)?;
        info!(id, "product_updated");
        Ok(ApiSuccess::ok("PRODUCT_UPDATED", "product updated", updated))
    }

    pub async fn delete(&self, id: Option<&str>) -> Result<ApiSuccess<Product>, ProductError> {
        let id = parse_id(id)?;
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| ProductError::DeleteFailed(e.to_string()))?
            .ok_or(ProductError::NotFound)?;
        info!(id, "product_deleted");
        Ok(ApiSuccess::ok("PRODUCT_DELETED", "product deleted", deleted))
    }
}

/// Strict id parsing for the mutating operations.
fn parse_id(id: Option<&str>) -> Result<i64, ProductError> {
    let raw = id.ok_or(ProductError::MissingId)?;
    raw.trim().parse::<i64>().map_err(|_| ProductError::InvalidId)
}
