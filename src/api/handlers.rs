//! API handlers for the maintenance dashboard.
//!
//! All handlers are synchronous computations over the immutable [`Dataset`]
//! loaded at startup; the state is shared through `Arc` without locks.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::MaintenanceConfig;
use crate::dashboard::{self, KpiBarChart, RiskReadout, TimelinePoint};
use crate::data::Dataset;
use crate::risk::{RiskError, RiskPredictor};
use crate::types::{KpiSummary, KpiTotals, MachineFilter, MaintenanceEvent};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    /// Workshop tables loaded at startup
    pub dataset: Arc<Dataset>,
    /// Failure classifier with its class layout resolved
    pub predictor: Arc<RiskPredictor>,
    /// Effective configuration (after CLI overrides)
    pub config: Arc<MaintenanceConfig>,
}

impl DashboardState {
    pub fn new(dataset: Dataset, predictor: RiskPredictor, config: MaintenanceConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            predictor: Arc::new(predictor),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MachineQuery {
    #[serde(default)]
    pub machine: Option<String>,
}

impl MachineQuery {
    fn filter(&self) -> MachineFilter {
        MachineFilter::from_query(self.machine.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub machines: usize,
    pub events: usize,
}

#[derive(Debug, Serialize)]
pub struct MachinesResponse {
    /// Table/chart filter options, "All" first
    pub filter: Vec<String>,
    /// Prediction target options
    pub prediction: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct KpiTableResponse {
    pub machine: MachineFilter,
    pub rows: Vec<KpiSummary>,
    pub totals: KpiTotals,
}

#[derive(Debug, Serialize)]
pub struct EventTableResponse {
    pub machine: MachineFilter,
    pub rows: Vec<MaintenanceEvent>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub machine: MachineFilter,
    pub severe_downtime_h: f64,
    pub points: Vec<TimelinePoint>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health(State(state): State<DashboardState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        machines: state.dataset.machines().len(),
        events: state.dataset.events().len(),
    })
}

/// GET /api/v1/machines
pub async fn machines(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(MachinesResponse {
        filter: dashboard::machine_options(&state.dataset),
        prediction: dashboard::prediction_options(&state.dataset),
    })
}

/// GET /api/v1/kpis?machine=All
pub async fn kpis(State(state): State<DashboardState>, Query(q): Query<MachineQuery>) -> Response {
    let filter = q.filter();
    let rows: Vec<KpiSummary> = state.dataset.kpis_for(&filter).into_iter().cloned().collect();
    let totals = KpiTotals::from_rows(&rows);
    ApiResponse::ok(KpiTableResponse {
        machine: filter,
        rows,
        totals,
    })
}

/// GET /api/v1/summary?machine=All
pub async fn summary(State(state): State<DashboardState>, Query(q): Query<MachineQuery>) -> Response {
    let filter = q.filter();
    ApiResponse::ok(KpiTotals::from_rows(state.dataset.kpis_for(&filter)))
}

/// GET /api/v1/charts/kpis
///
/// Charts always cover every machine, whatever the table filter is.
pub async fn kpi_charts(State(state): State<DashboardState>) -> Response {
    let charts: Vec<KpiBarChart> = dashboard::kpi_charts(state.dataset.kpis());
    ApiResponse::ok(charts)
}

/// GET /api/v1/events?machine=All
pub async fn events(State(state): State<DashboardState>, Query(q): Query<MachineQuery>) -> Response {
    let filter = q.filter();
    let rows = state.dataset.events_for(&filter).into_iter().cloned().collect();
    ApiResponse::ok(EventTableResponse { machine: filter, rows })
}

/// GET /api/v1/timeline?machine=All
pub async fn timeline(State(state): State<DashboardState>, Query(q): Query<MachineQuery>) -> Response {
    let filter = q.filter();
    let severe_downtime_h = state.config.timeline.severe_downtime_h;
    let points = dashboard::timeline_points(state.dataset.events_for(&filter), severe_downtime_h);
    ApiResponse::ok(TimelineResponse {
        machine: filter,
        severe_downtime_h,
        points,
    })
}

/// GET /api/v1/risk/:machine
pub async fn risk(State(state): State<DashboardState>, Path(machine): Path<String>) -> Response {
    if !state.dataset.has_machine(&machine) {
        return ApiErrorResponse::not_found(format!("Unknown machine '{machine}'"));
    }

    let risk_config = &state.config.risk;
    let result: Result<RiskReadout, RiskError> = dashboard::risk_readout(
        state.dataset.events(),
        &machine,
        &state.predictor,
        risk_config.window_days,
        risk_config.horizon_days,
    );

    match result {
        Ok(readout) => ApiResponse::ok(readout),
        Err(e @ RiskError::InsufficientHistory { .. }) => ApiErrorResponse::no_prediction(e.to_string()),
        Err(e @ RiskError::ModelShape { .. }) => {
            warn!(machine = %machine, error = %e, "Risk model output rejected");
            ApiErrorResponse::internal(e.to_string())
        }
    }
}

/// Fallback for unknown `/api` paths.
pub async fn api_not_found() -> Response {
    ApiErrorResponse::not_found("No such endpoint")
}
