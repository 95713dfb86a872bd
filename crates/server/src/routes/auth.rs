use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use models::user::Role;
use service::auth::domain::{LoginData, LoginInput, RegisterData, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::token::TokenIssuer;
use service::auth::AuthService;
use service::envelope::ApiSuccess;
use service::product::ProductService;

use crate::errors::ApiError;

/// Cookie the issued token is placed in on login.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService>,
    pub auth: Arc<AuthService>,
    pub issuer: Arc<dyn TokenIssuer>,
    pub cookie_secure: bool,
    pub token_ttl_days: i64,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid or duplicate email")
    ))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<ApiSuccess<RegisterData>, ApiError> {
    Ok(state.auth.register(input).await?)
}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in, auth cookie set"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "Unknown email")
    ))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, ApiSuccess<LoginData>), ApiError> {
    let session = state.auth.login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.data.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.cookie_secure);
    cookie.set_same_site(SameSite::None);
    cookie.set_max_age(time::Duration::days(state.token_ttl_days));

    Ok((jar.add(cookie), session))
}

/// Guard for the mutating catalog routes: a valid token from the
/// `Authorization` header or the auth cookie, carrying the admin role.
pub async fn require_admin(
    State(state): State<ServerState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .or_else(|| jar.get(AUTH_COOKIE).map(|c| c.value().to_string()))
        .ok_or(AuthError::MissingToken)?;
    let claims = state.issuer.verify(&token)?;
    if claims.role != Role::Admin {
        return Err(AuthError::Forbidden.into());
    }
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}
