use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{FindOneOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};

use models::user::User;

use super::repository::UserRepository;
use crate::errors::{backend, is_duplicate_key, StorageError};

/// MongoDB-backed account repository over the `Users` collection.
///
/// Emails are stored lowercased, so the unique index makes uniqueness
/// case-insensitive.
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection::<User>("Users") }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await.map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        // Default projection hides the hash; it deserializes as empty.
        let options = FindOneOptions::builder().projection(doc! { "password": 0 }).build();
        self.collection.find_one(doc! { "email": email }, options).await.map_err(backend)
    }

    async fn find_by_email_with_password(
        &self,
        email: &str,
    ) -> Result<Option<User>, StorageError> {
        self.collection.find_one(doc! { "email": email }, None).await.map_err(backend)
    }

    async fn insert(&self, user: User) -> Result<User, StorageError> {
        user.validate()?;
        match self.collection.insert_one(&user, None).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => {
                Err(StorageError::Duplicate(format!("email {}", user.email)))
            }
            Err(e) => Err(backend(e)),
        }
    }
}
