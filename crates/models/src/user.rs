use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Account document in the `Users` collection. The email is stored lowercased
/// so uniqueness is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2 digest. Default lookups project this field out, in which case it
    /// deserializes to an empty string.
    #[serde(default, rename = "password")]
    pub password_hash: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.email)?;
        validate_full_name(&self.full_name)
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ModelError::Validation("email is required".into()));
    }
    if !email.is_ascii() {
        return Err(ModelError::Validation("email must contain only ASCII characters".into()));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation(format!("invalid email: {email}")));
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None)
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            Ok(())
        }
        _ => Err(ModelError::Validation(format!("invalid email: {email}"))),
    }
}

pub fn validate_full_name(name: &str) -> Result<(), ModelError> {
    let len = name.trim().chars().count();
    if !(3..=50).contains(&len) {
        return Err(ModelError::Validation("fullName must be 3 to 50 characters".into()));
    }
    Ok(())
}
