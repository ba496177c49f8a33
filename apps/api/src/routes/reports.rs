//! Dashboard report routes.
//!
//! Each request loads the full product and/or invoice lists and folds them
//! with the pure functions in `crown_core::reports`.
//!
//! ```text
//! GET /api/reports/summary
//! GET /api/reports/sales-over-time
//! GET /api/reports/top-selling?limit=5
//! GET /api/reports/low-stock?threshold=10
//! GET /api/reports/dead-stock?days=90
//! ```

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crown_core::reports::{self, ReportSummary, SalesOverTime, TopSellingProduct};
use crown_core::{Product, ValidationError};

use crate::error::{ok, ApiError, ApiResult};
use crate::extract::ApiQuery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/sales-over-time", get(sales_over_time))
        .route("/top-selling", get(top_selling))
        .route("/low-stock", get(low_stock))
        .route("/dead-stock", get(dead_stock))
}

#[derive(Debug, Default, Deserialize)]
pub struct TopSellingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeadStockQuery {
    pub days: Option<i64>,
}

fn non_negative(field: &str, value: i64) -> Result<i64, ApiError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        }
        .into());
    }
    Ok(value)
}

/// GET /api/reports/summary
async fn summary(State(state): State<AppState>) -> ApiResult<ReportSummary> {
    let products = state.stores.products.list().await?.items;
    let invoices = state.stores.invoices.list().await?.items;

    Ok(ok(reports::summary(
        &products,
        &invoices,
        state.config.low_stock_threshold,
    )))
}

/// GET /api/reports/sales-over-time
async fn sales_over_time(State(state): State<AppState>) -> ApiResult<Vec<SalesOverTime>> {
    let invoices = state.stores.invoices.list().await?.items;
    Ok(ok(reports::sales_over_time(&invoices)))
}

/// GET /api/reports/top-selling
async fn top_selling(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TopSellingQuery>,
) -> ApiResult<Vec<TopSellingProduct>> {
    let invoices = state.stores.invoices.list().await?.items;
    Ok(ok(reports::top_selling(&invoices, query.limit)))
}

/// GET /api/reports/low-stock
async fn low_stock(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LowStockQuery>,
) -> ApiResult<Vec<Product>> {
    let threshold = non_negative(
        "threshold",
        query.threshold.unwrap_or(state.config.low_stock_threshold),
    )?;
    let products = state.stores.products.list().await?.items;
    Ok(ok(reports::low_stock(&products, threshold)))
}

/// GET /api/reports/dead-stock
async fn dead_stock(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DeadStockQuery>,
) -> ApiResult<Vec<Product>> {
    let days = non_negative("days", query.days.unwrap_or(state.config.dead_stock_days))?;
    let products = state.stores.products.list().await?.items;
    let invoices = state.stores.invoices.list().await?.items;

    Ok(ok(reports::dead_stock(
        &products,
        &invoices,
        Utc::now().timestamp_millis(),
        days,
    )))
}
