use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::Message;
use service::catalog::{Product, ProductInput, ProductPatch};
use tracing::debug;

use crate::{errors::ApiError, routes::ServerState};

/// Ids that are not unsigned integers cannot exist in the store, so they are
/// reported the same way as a missing record.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim().parse::<u64>().map_err(|_| {
        debug!(id = %raw, "non-numeric product id");
        ApiError::NotFound
    })
}

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    responses(
        (status = 200, description = "All products in insertion order", body = [crate::openapi::ProductDoc])
    )
)]
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Product>> {
    Json(state.products.list().await)
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = String)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 422, description = "A field has the wrong type"),
        (status = 500, description = "No product id left to assign")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    patch, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = String)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.products.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = String)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    Ok(Json(Message::new("product deleted")))
}
