use async_trait::async_trait;

use models::product::{Product, ProductPatch};

use crate::errors::StorageError;
use crate::query::{ProductFilter, QueryOptions};

/// Persistence contract for the product catalog.
///
/// Implementations must enforce a unique constraint on `id`, provide
/// document-level atomicity for update/delete, and run document validation on
/// every write.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_many(
        &self,
        filter: &ProductFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Product>, StorageError>;

    /// Uniformly sample up to `size` documents from the filtered set.
    async fn sample_random(
        &self,
        filter: &ProductFilter,
        size: u64,
    ) -> Result<Vec<Product>, StorageError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StorageError>;

    /// Highest assigned id, or 0 when the collection is empty.
    async fn max_id(&self) -> Result<i64, StorageError>;

    async fn insert(&self, product: Product) -> Result<Product, StorageError>;

    /// Shallow-merge `patch` onto the stored document; `None` when no document
    /// has that id.
    async fn update(&self, id: i64, patch: &ProductPatch)
        -> Result<Option<Product>, StorageError>;

    /// Remove by id, returning the removed document.
    async fn delete(&self, id: i64) -> Result<Option<Product>, StorageError>;
}

/// Simple in-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use crate::query::SortDirection;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use std::cmp::Ordering;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockProductRepository {
        items: Mutex<Vec<Product>>,
    }

    impl MockProductRepository {
        pub fn with_items(items: Vec<Product>) -> Self {
            Self { items: Mutex::new(items) }
        }
    }

    fn matches(filter: &ProductFilter, product: &Product) -> bool {
        if let Some(category) = &filter.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(sub) = &filter.sub_category {
            if &product.sub_category != sub {
                return false;
            }
        }
        if let Some(min) = filter.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = filter.max_price {
            if product.price > max {
                return false;
            }
        }
        if let Some(featured) = filter.is_featured {
            if product.is_featured.unwrap_or(false) != featured {
                return false;
            }
        }
        if let Some(flash) = filter.is_flash {
            if product.is_flash.unwrap_or(false) != flash {
                return false;
            }
        }
        true
    }

    fn sort_key(product: &Product, field: &str) -> serde_json::Value {
        serde_json::to_value(product)
            .ok()
            .and_then(|v| v.get(field).cloned())
            .unwrap_or(serde_json::Value::Null)
    }

    fn compare(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (a.as_str(), b.as_str()) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn find_many(
            &self,
            filter: &ProductFilter,
            options: &QueryOptions,
        ) -> Result<Vec<Product>, StorageError> {
            let items = self.items.lock().unwrap();
            let mut out: Vec<Product> =
                items.iter().filter(|p| matches(filter, p)).cloned().collect();
            if let Some(sort) = &options.sort {
                out.sort_by(|a, b| {
                    let ord = compare(&sort_key(a, &sort.field), &sort_key(b, &sort.field));
                    match sort.direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                });
            }
            Ok(out
                .into_iter()
                .skip(options.skip() as usize)
                .take(options.limit as usize)
                .collect())
        }

        async fn sample_random(
            &self,
            filter: &ProductFilter,
            size: u64,
        ) -> Result<Vec<Product>, StorageError> {
            let items = self.items.lock().unwrap();
            let mut out: Vec<Product> =
                items.iter().filter(|p| matches(filter, p)).cloned().collect();
            out.shuffle(&mut thread_rng());
            out.truncate(size as usize);
            Ok(out)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
            let items = self.items.lock().unwrap();
            Ok(items.iter().find(|p| p.id == id).cloned())
        }

        async fn max_id(&self) -> Result<i64, StorageError> {
            let items = self.items.lock().unwrap();
            Ok(items.iter().map(|p| p.id).max().unwrap_or(0))
        }

        async fn insert(&self, product: Product) -> Result<Product, StorageError> {
            product.validate()?;
            let mut items = self.items.lock().unwrap();
            if items.iter().any(|p| p.id == product.id) {
                return Err(StorageError::Duplicate(format!("product id {}", product.id)));
            }
            items.push(product.clone());
            Ok(product)
        }

        async fn update(
            &self,
            id: i64,
            patch: &ProductPatch,
        ) -> Result<Option<Product>, StorageError> {
            let mut items = self.items.lock().unwrap();
            let Some(existing) = items.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            let mut merged = existing.clone();
            patch.apply_to(&mut merged);
            merged.validate()?;
            *existing = merged.clone();
            Ok(Some(merged))
        }

        async fn delete(&self, id: i64) -> Result<Option<Product>, StorageError> {
            let mut items = self.items.lock().unwrap();
            let position = items.iter().position(|p| p.id == id);
            Ok(position.map(|i| items.remove(i)))
        }
    }
}
