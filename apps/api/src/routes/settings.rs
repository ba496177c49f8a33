//! Store settings routes.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use tracing::info;

use crown_core::validation::validate_settings;
use crown_core::{StoreSettings, SETTINGS_ID};

use crate::error::{ok, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(fetch).post(update))
}

/// GET /api/settings
async fn fetch(State(state): State<AppState>) -> ApiResult<StoreSettings> {
    Ok(ok(state.stores.store_settings().await?))
}

/// POST /api/settings, a partial update over the current settings
async fn update(
    State(state): State<AppState>,
    ApiJson(partial): ApiJson<Value>,
) -> ApiResult<StoreSettings> {
    let settings = &state.stores.settings;

    // The singleton has nothing stored until the first save.
    if !settings.exists(SETTINGS_ID).await? {
        settings.put(&settings.get(SETTINGS_ID).await?).await?;
    }

    let updated = settings
        .patch_checked(SETTINGS_ID, partial, validate_settings)
        .await?;
    info!(name = %updated.name, tax_rate = updated.tax_rate, "Store settings saved");
    Ok(ok(updated))
}
