//! Product routes.
//!
//! `GET /api/products?q=oxford&categoryId=cat1` narrows the list by a
//! case-insensitive name/SKU substring and by category.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crown_core::validation::{validate_product, validate_search_query};
use crown_core::{Product, ValidationError};

use super::Deleted;
use crate::error::{ok, ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub q: Option<String>,
    pub category_id: Option<String>,
}

fn matches(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle) || product.sku.to_lowercase().contains(needle)
}

/// GET /api/products
async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> ApiResult<Vec<Product>> {
    let mut products = state.stores.products.list().await?.items;

    if let Some(q) = query.q.as_deref() {
        let needle = validate_search_query(q)?.to_lowercase();
        if !needle.is_empty() {
            products.retain(|p| matches(p, &needle));
        }
    }
    if let Some(category_id) = query.category_id.as_deref() {
        products.retain(|p| p.category_id == category_id);
    }

    Ok(ok(products))
}

/// GET /api/products/{id}
async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Product> {
    let product = state
        .stores
        .products
        .find(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", id)))?;
    Ok(ok(product))
}

/// POST /api/products
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Product>,
) -> ApiResult<Product> {
    validate_product(&payload)?;
    ensure_category(&state, &payload.category_id).await?;

    let product = state.stores.products.create(payload).await?;
    info!(id = %product.id, sku = %product.sku, quantity = product.quantity, "Product created");
    Ok(ok(product))
}

/// PUT /api/products/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(partial): ApiJson<Value>,
) -> ApiResult<Product> {
    if let Some(category_id) = partial.get("categoryId").and_then(Value::as_str) {
        ensure_category(&state, category_id).await?;
    }

    let product = state
        .stores
        .products
        .patch_checked(&id, partial, validate_product)
        .await?;
    Ok(ok(product))
}

/// DELETE /api/products/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    if !state.stores.products.delete(&id).await? {
        return Err(ApiError::not_found(format!("Product not found: {}", id)));
    }
    info!(id = %id, "Product deleted");
    Ok(ok(Deleted::new(id)))
}

/// A non-empty `categoryId` must name a stored category.
async fn ensure_category(state: &AppState, category_id: &str) -> Result<(), ApiError> {
    if category_id.is_empty() || state.stores.categories.exists(category_id).await? {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: "categoryId".to_string(),
        reason: format!("unknown category {}", category_id),
    }
    .into())
}
