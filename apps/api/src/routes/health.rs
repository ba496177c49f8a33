//! Health route. Public, no seeding side effects beyond the shared middleware.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::error::{ok, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    backend: &'static str,
    latency_ms: u64,
}

async fn health(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    let backend = state.stores.backend();

    let started = Instant::now();
    let healthy = backend.health_check().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    Ok(ok(HealthResponse {
        status: if healthy { "ok" } else { "error" },
        version: env!("CARGO_PKG_VERSION"),
        backend: backend.name(),
        latency_ms,
    }))
}
