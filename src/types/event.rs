//! Historical failure events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded machine failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    /// Machine identifier
    pub machine: String,
    /// When the failure was recorded (UTC)
    pub failure_date: DateTime<Utc>,
    /// Downtime caused by the failure (hours)
    pub downtime_h: f64,
    /// Repair cost (EUR)
    pub cost_eur: f64,
    /// Units scrapped because of the failure
    pub scrap_units: f64,
}

impl MaintenanceEvent {
    /// Whether the downtime is strictly above `threshold_h`.
    pub fn is_severe(&self, threshold_h: f64) -> bool {
        self.downtime_h > threshold_h
    }
}
