use async_trait::async_trait;

use models::user::User;

use crate::errors::StorageError;

/// Persistence contract for user accounts.
///
/// `find_by_email` mirrors the default projection that hides the password
/// hash; `find_by_email_with_password` opts back in for credential checks.
/// Implementations must enforce a unique constraint on the lowercased email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;
    async fn find_by_email_with_password(&self, email: &str)
        -> Result<Option<User>, StorageError>;
    async fn insert(&self, user: User) -> Result<User, StorageError>;
}

/// Simple in-memory user store for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        // key: lowercased email
        users: Mutex<HashMap<String, User>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&email.to_lowercase()).cloned().map(|mut user| {
                user.password_hash.clear();
                user
            }))
        }

        async fn find_by_email_with_password(
            &self,
            email: &str,
        ) -> Result<Option<User>, StorageError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&email.to_lowercase()).cloned())
        }

        async fn insert(&self, user: User) -> Result<User, StorageError> {
            user.validate()?;
            let mut users = self.users.lock().unwrap();
            let key = user.email.to_lowercase();
            if users.contains_key(&key) {
                return Err(StorageError::Duplicate(format!("email {}", user.email)));
            }
            users.insert(key, user.clone());
            Ok(user)
        }
    }
}
