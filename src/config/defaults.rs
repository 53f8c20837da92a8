//! System-wide default constants.

// ============================================================================
// Input files
// ============================================================================

/// Per-machine KPI summary table.
pub const KPI_PATH: &str = "data/kpis_summary.csv";

/// Failure event history table.
pub const EVENTS_PATH: &str = "data/maintenance_events.csv";

/// Exported failure classifier.
pub const MODEL_PATH: &str = "data/rf_model_maintenance.json";

/// Local config file checked when `MAINTENANCE_CONFIG` is unset.
pub const LOCAL_CONFIG_FILE: &str = "maintenance.toml";

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "MAINTENANCE_CONFIG";

// ============================================================================
// Risk
// ============================================================================

/// Rolling feature window before the reference event (days).
///
/// The classifier's `*_7d` inputs were fit on this window, so config
/// validation rejects any other value.
pub const ROLLING_WINDOW_DAYS: u32 = 7;

/// `days_since_last` reported when the window holds no earlier event.
pub const EMPTY_WINDOW_DAYS_SINCE_LAST: u32 = 7;

/// Horizon the classifier was trained to predict over (days).
pub const PREDICTION_HORIZON_DAYS: u32 = 7;

/// Risk percentage at which the readout turns orange.
pub const MEDIUM_RISK_PCT: f64 = 30.0;

/// Risk percentage at which the readout turns red.
pub const HIGH_RISK_PCT: f64 = 60.0;

// ============================================================================
// Timeline
// ============================================================================

/// Events with downtime above this are drawn dark red (hours).
pub const SEVERE_DOWNTIME_H: f64 = 5.0;

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";
