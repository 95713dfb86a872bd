use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::options::{
    FindOneAndUpdateOptions, FindOneOptions, FindOptions, IndexOptions, ReturnDocument,
};
use mongodb::{Collection, Database, IndexModel};

use models::product::{Product, ProductPatch};

use super::repository::ProductRepository;
use crate::errors::{backend, is_duplicate_key, StorageError};
use crate::query::{ProductFilter, QueryOptions, SortDirection};

/// MongoDB-backed catalog repository over the `Products` collection.
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection::<Product>("Products") }
    }

    /// Unique index on `id`; concurrent max-id races fail loudly instead of
    /// colliding.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await.map_err(backend)?;
        Ok(())
    }
}

fn filter_document(filter: &ProductFilter) -> Document {
    let mut out = Document::new();
    if let Some(category) = &filter.category {
        out.insert("category", category);
    }
    if let Some(sub) = &filter.sub_category {
        out.insert("subCategory", sub);
    }
    let mut price = Document::new();
    if let Some(min) = filter.min_price {
        price.insert("$gte", min);
    }
    if let Some(max) = filter.max_price {
        price.insert("$lte", max);
    }
    if !price.is_empty() {
        out.insert("price", price);
    }
    if let Some(featured) = filter.is_featured {
        out.insert("isFeatured", featured);
    }
    if let Some(flash) = filter.is_flash {
        out.insert("isFlash", flash);
    }
    out
}

fn sort_document(options: &QueryOptions) -> Option<Document> {
    options.sort.as_ref().map(|sort| {
        let direction = match sort.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        };
        let mut out = Document::new();
        out.insert(sort.field.clone(), direction);
        out
    })
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn find_many(
        &self,
        filter: &ProductFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Product>, StorageError> {
        let find = FindOptions::builder()
            .sort(sort_document(options))
            .skip(options.skip())
            .limit(options.limit as i64)
            .build();
        let cursor = self.collection.find(filter_document(filter), find).await.map_err(backend)?;
        cursor.try_collect().await.map_err(backend)
    }

    async fn sample_random(
        &self,
        filter: &ProductFilter,
        size: u64,
    ) -> Result<Vec<Product>, StorageError> {
        let pipeline = vec![
            doc! { "$match": filter_document(filter) },
            doc! { "$sample": { "size": size as i64 } },
        ];
        let mut cursor = self.collection.aggregate(pipeline, None).await.map_err(backend)?;
        let mut out = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(backend)? {
            let product =
                bson::from_document(document).map_err(|e| StorageError::Backend(e.to_string()))?;
            out.push(product);
        }
        Ok(out)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StorageError> {
        self.collection.find_one(doc! { "id": id }, None).await.map_err(backend)
    }

    async fn max_id(&self) -> Result<i64, StorageError> {
        let top = self
            .collection
            .find_one(None, FindOneOptions::builder().sort(doc! { "id": -1 }).build())
            .await
            .map_err(backend)?;
        Ok(top.map(|p| p.id).unwrap_or(0))
    }

    async fn insert(&self, product: Product) -> Result<Product, StorageError> {
        product.validate()?;
        match self.collection.insert_one(&product, None).await {
            Ok(_) => Ok(product),
            Err(e) if is_duplicate_key(&e) => {
                Err(StorageError::Duplicate(format!("product id {}", product.id)))
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn update(
        &self,
        id: i64,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, StorageError> {
        // Merge in memory first so the patched document is validated with the
        // same rules as creation before anything is persisted.
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut merged = current;
        patch.apply_to(&mut merged);
        merged.validate()?;
        let set = bson::to_document(patch).map_err(|e| StorageError::Backend(e.to_string()))?;
        let options =
            FindOneAndUpdateOptions::builder().return_document(ReturnDocument::After).build();
        self.collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set }, options)
            .await
            .map_err(backend)
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, StorageError> {
        self.collection.find_one_and_delete(doc! { "id": id }, None).await.map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortSpec;

    fn filter(min: Option<f64>, max: Option<f64>) -> ProductFilter {
        ProductFilter { min_price: min, max_price: max, ..ProductFilter::default() }
    }

    #[test]
    fn empty_filter_builds_empty_document() {
        assert!(filter_document(&ProductFilter::default()).is_empty());
    }

    #[test]
    fn price_bounds_fold_into_one_range() {
        let document = filter_document(&filter(Some(50.0), Some(100.0)));
        let range = document.get_document("price").unwrap();
        assert_eq!(range.get_f64("$gte").unwrap(), 50.0);
        assert_eq!(range.get_f64("$lte").unwrap(), 100.0);
    }

    #[test]
    fn exact_terms_use_document_field_names() {
        let document = filter_document(&ProductFilter {
            category: Some("electronics".into()),
            sub_category: Some("audio".into()),
            is_featured: Some(true),
            ..ProductFilter::default()
        });
        assert_eq!(document.get_str("category").unwrap(), "electronics");
        assert_eq!(document.get_str("subCategory").unwrap(), "audio");
        assert!(document.get_bool("isFeatured").unwrap());
    }

    #[test]
    fn sort_direction_maps_to_sign() {
        let options = QueryOptions {
            sort: Some(SortSpec {
                field: "price".into(),
                direction: SortDirection::Descending,
            }),
            ..QueryOptions::default()
        };
        let document = sort_document(&options).unwrap();
        assert_eq!(document.get_i32("price").unwrap(), -1);
    }
}
