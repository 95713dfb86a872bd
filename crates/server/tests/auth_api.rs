use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::{json, Value};
use tower::Service;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth::ServerState};
use service::auth::password::Argon2Hasher;
use service::auth::repository::mock::MockUserRepository;
use service::auth::token::{JwtIssuer, TokenIssuer};
use service::auth::AuthService;
use service::product::repository::mock::MockProductRepository;
use service::product::ProductService;

const TEST_SECRET: &str = "test-secret";

fn build_app() -> Router {
    let issuer = Arc::new(JwtIssuer::new(TEST_SECRET));
    let state = ServerState {
        products: Arc::new(ProductService::new(Arc::new(MockProductRepository::default()))),
        auth: Arc::new(AuthService::new(
            Arc::new(MockUserRepository::default()),
            Arc::new(Argon2Hasher),
            issuer.clone(),
            Duration::days(7),
        )),
        issuer,
        cookie_secure: false,
        token_ttl_days: 7,
    };
    routes::build_router(CorsLayer::very_permissive(), state)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "S3curePass!",
        "fullName": "Jane Doe"
    })
}

#[tokio::test]
async fn register_returns_user_id_only() {
    let app = build_app();
    let response =
        app.clone().call(post_json("/auth/register", &register_body("jane@example.com"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["successCode"], "USER_CREATED");
    assert!(body["data"]["userId"].is_string());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let app = build_app();
    for email in ["", "not-an-email", "jan\u{00e9}@example.com"] {
        let response =
            app.clone().call(post_json("/auth/register", &register_body(email))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "email: {email:?}");
        let body = body_json(response).await;
        assert_eq!(body["errorCode"], "INVALID_EMAIL");
    }
}

#[tokio::test]
async fn duplicate_registration_is_case_insensitive() {
    let app = build_app();
    let response = app
        .clone()
        .call(post_json("/auth/register", &register_body("Jane@Example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .call(post_json("/auth/register", &register_body("jane@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errorCode"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn login_sets_auth_cookie_and_returns_claims() {
    let app = build_app();
    app.clone()
        .call(post_json("/auth/register", &register_body("jane@example.com")))
        .await
        .unwrap();

    let response = app
        .clone()
        .call(post_json(
            "/auth/login",
            &json!({"email": "jane@example.com", "password": "S3curePass!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set the auth cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=None"));

    let body = body_json(response).await;
    assert_eq!(body["successCode"], "USER_LOGIN");
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");
    assert_eq!(body["data"]["user"]["fullName"], "Jane Doe");
    assert_eq!(body["data"]["user"]["role"], "user");

    // Token claims round-trip through the issuer.
    let token = body["data"]["token"].as_str().unwrap();
    let claims = JwtIssuer::new(TEST_SECRET).verify(token).unwrap();
    assert_eq!(claims.email, "jane@example.com");
    assert_eq!(claims.full_name, "Jane Doe");
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let app = build_app();
    app.clone()
        .call(post_json("/auth/register", &register_body("jane@example.com")))
        .await
        .unwrap();

    let response = app
        .clone()
        .call(post_json("/auth/login", &json!({"email": "jane@example.com", "password": "wrong"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["errorCode"], "INVALID_PASSWORD");
}

#[tokio::test]
async fn login_unknown_email_is_not_found() {
    let app = build_app();
    let response = app
        .clone()
        .call(post_json("/auth/login", &json!({"email": "ghost@example.com", "password": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn admin_cookie_opens_mutating_routes() {
    let app = build_app();
    let response = app
        .clone()
        .call(post_json(
            "/auth/register",
            &json!({
                "email": "root@example.com",
                "password": "S3curePass!",
                "fullName": "Root Admin",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .call(post_json(
            "/auth/login",
            &json!({"email": "root@example.com", "password": "S3curePass!"}),
        ))
        .await
        .unwrap();
    let cookie = response.headers().get("set-cookie").unwrap().to_str().unwrap().to_string();
    let pair = cookie.split(';').next().unwrap().to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .header("cookie", pair)
        .body(Body::from(
            serde_json::to_vec(&json!({
                "title": "Wireless Mouse",
                "price": 49.9,
                "mainImgSRC": "https://cdn.example.com/mouse.png",
                "description": "A comfortable wireless mouse.",
                "category": "electronics",
                "subCategory": "accessories",
                "colors": [{"color": "black", "images": [], "quantity": 5}]
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], 1);
}
