//! # HTTP Routes
//!
//! ## Route Table
//! ```text
//! ┌──────────────────────────────────────┬──────────────────────────────────┐
//! │ /api/health                          │ backend round trip               │
//! │ /api/categories[/{id}]               │ CRUD                             │
//! │ /api/products[/{id}]                 │ CRUD, ?q= search                 │
//! │ /api/invoices[/{id}[/public|/send]]  │ list, create, fetch, send        │
//! │ /api/settings                        │ singleton fetch / partial update │
//! │ /api/staff[/{id}]                    │ CRUD                             │
//! │ /api/reports/*                       │ dashboard aggregations           │
//! └──────────────────────────────────────┴──────────────────────────────────┘
//! ```
//!
//! Every request first makes sure the catalogue seed is present.

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub mod categories;
pub mod health;
pub mod invoices;
pub mod products;
pub mod reports;
pub mod settings;
pub mod staff;

/// Body of a successful DELETE.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: String) -> Self {
        Deleted { id, deleted: true }
    }
}

/// All routes, no middleware, no state.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(invoices::router())
        .merge(settings::router())
        .merge(staff::router())
        .merge(reports::router())
}

/// The fully layered application, used by the server and by tests.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), ensure_seed))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ensure_seed(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Err(e) = state.stores.ensure_seed().await {
        return ApiError::from(e).into_response();
    }
    next.run(request).await
}

async fn not_found(request: Request) -> ApiError {
    ApiError::not_found(format!("No route for {} {}", request.method(), request.uri().path()))
}
