//! Staff routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use tracing::info;

use crown_core::validation::validate_staff;
use crown_core::{StaffMember, ValidationError};

use super::Deleted;
use crate::error::{ok, ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/staff", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/staff
async fn list(State(state): State<AppState>) -> ApiResult<Vec<StaffMember>> {
    Ok(ok(state.stores.staff.list().await?.items))
}

/// GET /api/staff/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StaffMember> {
    let member = state
        .stores
        .staff
        .find(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Staff member not found: {}", id)))?;
    Ok(ok(member))
}

/// POST /api/staff
///
/// `role` has a default on the record type, so its presence is checked on
/// the raw body.
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<StaffMember> {
    if payload.get("role").is_none() {
        return Err(ValidationError::required("role").into());
    }
    let member: StaffMember =
        serde_json::from_value(payload).map_err(|e| ApiError::validation(e.to_string()))?;
    validate_staff(&member)?;

    let member = state.stores.staff.create(member).await?;
    info!(id = %member.id, role = ?member.role, "Staff member created");
    Ok(ok(member))
}

/// PUT /api/staff/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(partial): ApiJson<Value>,
) -> ApiResult<StaffMember> {
    let member = state
        .stores
        .staff
        .patch_checked(&id, partial, validate_staff)
        .await?;
    Ok(ok(member))
}

/// DELETE /api/staff/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    if !state.stores.staff.delete(&id).await? {
        return Err(ApiError::not_found(format!("Staff member not found: {}", id)));
    }
    info!(id = %id, "Staff member deleted");
    Ok(ok(Deleted::new(id)))
}
