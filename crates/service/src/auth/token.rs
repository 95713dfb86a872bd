use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::domain::UserClaims;
use super::errors::AuthError;

/// Stateless token capability: sign claims with an expiry, verify and get the
/// claims back.
pub trait TokenIssuer: Send + Sync {
    fn sign(&self, user: &UserClaims, ttl: Duration) -> Result<String, AuthError>;
    fn verify(&self, token: &str) -> Result<UserClaims, AuthError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    #[serde(flatten)]
    user: UserClaims,
    exp: i64,
}

/// HS256 JWT issuer.
pub struct JwtIssuer {
    secret: String,
}

impl JwtIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl TokenIssuer for JwtIssuer {
    fn sign(&self, user: &UserClaims, ttl: Duration) -> Result<String, AuthError> {
        let exp = (Utc::now() + ttl).timestamp();
        let claims = TokenClaims { user: user.clone(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;
        Ok(data.claims.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::user::Role;
    use uuid::Uuid;

    fn claims() -> UserClaims {
        UserClaims {
            id: Uuid::new_v4(),
            email: "jane@example.com".into(),
            full_name: "Jane Doe".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn sign_verify_roundtrip() {
        let issuer = JwtIssuer::new("secret");
        let claims = claims();
        let token = issuer.sign(&claims, Duration::days(7)).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), claims);
    }

    #[test]
    fn expired_token_rejected() {
        let issuer = JwtIssuer::new("secret");
        let token = issuer.sign(&claims(), Duration::hours(-1)).unwrap();
        assert!(matches!(issuer.verify(&token).unwrap_err(), AuthError::InvalidToken));
    }

    #[test]
    fn wrong_secret_rejected() {
        let issuer = JwtIssuer::new("secret");
        let token = issuer.sign(&claims(), Duration::days(1)).unwrap();
        let other = JwtIssuer::new("other-secret");
        assert!(matches!(other.verify(&token).unwrap_err(), AuthError::InvalidToken));
    }

    #[test]
    fn garbage_token_rejected() {
        let issuer = JwtIssuer::new("secret");
        assert!(matches!(issuer.verify("not.a.jwt").unwrap_err(), AuthError::InvalidToken));
    }
}
