use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;

use models::product::{NewProduct, Product, ProductPatch};
use service::envelope::ApiSuccess;

use super::auth::ServerState;
use crate::errors::ApiError;

#[utoipa::path(get, path = "/api/products", tag = "products",
    responses((status = 200, description = "Products matching the query")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<ApiSuccess<Vec<Product>>, ApiError> {
    Ok(state.products.list(&raw).await?)
}

#[utoipa::path(get, path = "/api/products/{id}", tag = "products",
    responses(
        (status = 200, description = "Product found"),
        (status = 404, description = "No product with that id")
    ))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Product>, ApiError> {
    Ok(state.products.get(Some(&id)).await?)
}

#[utoipa::path(post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductInput,
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Missing product data"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an admin")
    ))]
pub async fn create(
    State(state): State<ServerState>,
    payload: Option<Json<NewProduct>>,
) -> Result<ApiSuccess<Product>, ApiError> {
    Ok(state.products.create(payload.map(|Json(data)| data)).await?)
}

#[utoipa::path(patch, path = "/api/products/{id}", tag = "products",
    request_body = crate::openapi::ProductPatchInput,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Bad id or empty patch"),
        (status = 404, description = "No product with that id")
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Option<Json<ProductPatch>>,
) -> Result<ApiSuccess<Product>, ApiError> {
    Ok(state.products.update(Some(&id), payload.map(|Json(patch)| patch)).await?)
}

#[utoipa::path(delete, path = "/api/products/{id}", tag = "products",
    responses(
        (status = 200, description = "Product deleted; body carries the removed document"),
        (status = 404, description = "No product with that id")
    ))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Product>, ApiError> {
    Ok(state.products.delete(Some(&id)).await?)
}
