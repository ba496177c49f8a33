//! Invoice routes. All the work happens in [`InvoiceService`].
//!
//! [`InvoiceService`]: crate::services::InvoiceService

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;

use crown_core::{Invoice, InvoiceDraft};

use crate::error::{ok, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/invoices", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id))
        .route("/{id}/public", get(get_by_id))
        .route("/{id}/send", post(send))
}

/// GET /api/invoices, newest first
async fn list(State(state): State<AppState>) -> ApiResult<Vec<Invoice>> {
    Ok(ok(state.invoices.list().await?))
}

/// GET /api/invoices/{id} and /api/invoices/{id}/public
async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Invoice> {
    Ok(ok(state.invoices.get(&id).await?))
}

/// POST /api/invoices
async fn create(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<InvoiceDraft>,
) -> ApiResult<Invoice> {
    Ok(ok(state.invoices.create(draft).await?))
}

/// POST /api/invoices/{id}/send
async fn send(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Invoice> {
    Ok(ok(state.invoices.send(&id).await?))
}
