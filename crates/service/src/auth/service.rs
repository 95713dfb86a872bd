use std::sync::Arc;

use chrono::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use models::user::{self, User};

use super::domain::{LoginData, LoginInput, RegisterData, RegisterInput, UserClaims};
use super::errors::AuthError;
use super::password::PasswordHasher;
use super::repository::UserRepository;
use super::token::TokenIssuer;
use crate::envelope::ApiSuccess;
use crate::errors::StorageError;

/// Minimum plain-text password length. The stored-schema rule is checked here
/// because only the hash ever reaches the repository.
const MIN_PASSWORD_LEN: usize = 6;

/// Auth business service, independent of the web framework.
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self { repo, hasher, issuer, token_ttl }
    }

    /// Register a new account. The response carries the new id only; the
    /// password hash is never echoed.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(
        &self,
        input: RegisterInput,
    ) -> Result<ApiSuccess<RegisterData>, AuthError> {
        user::validate_email(&input.email).map_err(|_| AuthError::InvalidEmail)?;
        let email = input.email.trim().to_lowercase();

        let existing = self
            .repo
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if existing.is_some() {
            return Err(AuthError::EmailExists);
        }

        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::CreateFailed(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let password_hash = self.hasher.hash(&input.password)?;

        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name: input.full_name.trim().to_owned(),
            role: input.role.unwrap_or_default(),
        };
        let created = match self.repo.insert(user).await {
            Ok(created) => created,
            // A concurrent registration that slips past the lookup trips the
            // unique index on email.
            Err(StorageError::Duplicate(_)) => return Err(AuthError::EmailExists),
            Err(e) => return Err(AuthError::CreateFailed(e.to_string())),
        };
        info!(user_id = %created.id, "user_registered");
        Ok(ApiSuccess::created("USER_CREATED", "user created", RegisterData {
            user_id: created.id,
        }))
    }

    /// Authenticate and issue a signed token with a fixed expiry.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<ApiSuccess<LoginData>, AuthError> {
        let email = input.email.trim().to_lowercase();
        let user = self
            .repo
            .find_by_email_with_password(&email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            return Err(AuthError::InvalidPassword);
        }

        let claims = UserClaims {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        };
        let token = self.issuer.sign(&claims, self.token_ttl)?;
        info!(user_id = %claims.id, "user_login");
        Ok(ApiSuccess::ok("USER_LOGIN", "login successful", LoginData { token, user: claims }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::Argon2Hasher;
    use crate::auth::repository::mock::MockUserRepository;
    use crate::auth::token::JwtIssuer;
    use models::user::Role;

    fn service() -> (AuthService, JwtIssuer) {
        let issuer = JwtIssuer::new("test-secret");
        let svc = AuthService::new(
            Arc::new(MockUserRepository::default()),
            Arc::new(Argon2Hasher),
            Arc::new(JwtIssuer::new("test-secret")),
            Duration::days(7),
        );
        (svc, issuer)
    }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            password: "S3curePass!".into(),
            full_name: "Jane Doe".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_returns_only_the_new_id() {
        let (svc, _) = service();
        let created = svc.register(register_input("jane@example.com")).await.unwrap();
        assert_eq!(created.success_code, "USER_CREATED");
        assert_eq!(created.status_code, 201);
        let value = serde_json::to_value(&created).unwrap();
        assert!(value["data"].get("userId").is_some());
        assert!(value["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_case_insensitive() {
        let (svc, _) = service();
        svc.register(register_input("Jane@Example.com")).await.unwrap();
        let err = svc.register(register_input("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailExists));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn invalid_email_rejected() {
        let (svc, _) = service();
        for email in ["", "not-an-email", "jané@example.com"] {
            let err = svc.register(register_input(email)).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidEmail), "email: {email:?}");
        }
    }

    #[tokio::test]
    async fn short_password_surfaces_as_create_error() {
        // Known gap: stored-schema violations come back as a 500.
        let (svc, _) = service();
        let mut input = register_input("jane@example.com");
        input.password = "short".into();
        let err = svc.register(input).await.unwrap_err();
        assert!(matches!(err, AuthError::CreateFailed(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn login_unknown_user_is_not_found() {
        let (svc, _) = service();
        let input = LoginInput { email: "ghost@example.com".into(), password: "whatever".into() };
        let err = svc.login(input).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn login_wrong_password_rejected() {
        let (svc, _) = service();
        svc.register(register_input("jane@example.com")).await.unwrap();
        let input = LoginInput { email: "jane@example.com".into(), password: "wrong".into() };
        let err = svc.login(input).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidPassword));
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn login_issues_token_with_stored_claims() {
        let (svc, issuer) = service();
        let mut input = register_input("Jane@Example.com");
        input.role = Some(Role::Admin);
        svc.register(input).await.unwrap();

        let login =
            LoginInput { email: "jane@example.com".into(), password: "S3curePass!".into() };
        let session = svc.login(login).await.unwrap();
        assert_eq!(session.success_code, "USER_LOGIN");

        let claims = issuer.verify(&session.data.token).unwrap();
        assert_eq!(claims, session.data.user);
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.full_name, "Jane Doe");
        assert_eq!(claims.role, Role::Admin);
    }
}
