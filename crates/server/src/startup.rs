use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use dotenvy::dotenv;
use mongodb::Client;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::utils::logging::init_logging_default;
use configs::AppConfig;
use service::auth::mongo::MongoUserRepository;
use service::auth::password::Argon2Hasher;
use service::auth::token::JwtIssuer;
use service::auth::AuthService;
use service::product::mongo::MongoProductRepository;
use service::product::ProductService;

use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load config, connect storage, build the app, and serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = AppConfig::load_and_validate()?;

    let client = Client::with_uri_str(&cfg.database.url).await?;
    let db = client.database(&cfg.database.database);

    let product_repo = Arc::new(MongoProductRepository::new(&db));
    product_repo.ensure_indexes().await?;
    let user_repo = Arc::new(MongoUserRepository::new(&db));
    user_repo.ensure_indexes().await?;
    info!(database = %cfg.database.database, "storage ready");

    let issuer = Arc::new(JwtIssuer::new(cfg.auth.jwt_secret.clone()));
    let state = ServerState {
        products: Arc::new(ProductService::new(product_repo)),
        auth: Arc::new(AuthService::new(
            user_repo,
            Arc::new(Argon2Hasher),
            issuer.clone(),
            Duration::days(cfg.auth.token_ttl_days),
        )),
        issuer,
        cookie_secure: cfg.auth.cookie_secure(),
        token_ttl_days: cfg.auth.token_ttl_days,
    };

    let app: Router = routes::build_router(build_cors(), state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting storefront api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
