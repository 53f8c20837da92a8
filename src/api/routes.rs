//! API route definitions
//!
//! - /api/v1/machines - selector options
//! - /api/v1/kpis, /api/v1/summary - KPI table and totals for a selection
//! - /api/v1/charts/kpis - cost / downtime / scrap bar charts
//! - /api/v1/events, /api/v1/timeline - failure history for a selection
//! - /api/v1/risk/:machine - 7-day failure risk readout

use axum::{routing::get, Router};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/machines", get(handlers::machines))
        .route("/kpis", get(handlers::kpis))
        .route("/summary", get(handlers::summary))
        .route("/charts/kpis", get(handlers::kpi_charts))
        .route("/events", get(handlers::events))
        .route("/timeline", get(handlers::timeline))
        .route("/risk/:machine", get(handlers::risk))
        .fallback(handlers::api_not_found)
        .with_state(state)
}

/// Health endpoint at root level
pub fn health_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
