//! Category routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use tracing::info;

use crown_core::validation::validate_category;
use crown_core::Category;

use super::Deleted;
use crate::error::{ok, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/categories
async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    Ok(ok(state.stores.categories.list().await?.items))
}

/// GET /api/categories/{id}
async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Category> {
    let category = state
        .stores
        .categories
        .find(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Category not found: {}", id)))?;
    Ok(ok(category))
}

/// POST /api/categories
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Category>,
) -> ApiResult<Category> {
    validate_category(&payload)?;
    let category = state.stores.categories.create(payload).await?;
    info!(id = %category.id, name = %category.name, "Category created");
    Ok(ok(category))
}

/// PUT /api/categories/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(partial): ApiJson<Value>,
) -> ApiResult<Category> {
    let category = state
        .stores
        .categories
        .patch_checked(&id, partial, validate_category)
        .await?;
    Ok(ok(category))
}

/// DELETE /api/categories/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    if !state.stores.categories.delete(&id).await? {
        return Err(ApiError::not_found(format!("Category not found: {}", id)));
    }
    info!(id = %id, "Category deleted");
    Ok(ok(Deleted::new(id)))
}
