//! Failure timeline scatter.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::MaintenanceEvent;

/// Marker colour for events above the severe-downtime threshold.
pub const SEVERE_COLOR: &str = "darkred";
/// Marker colour for every other event.
pub const MILD_COLOR: &str = "orange";

/// One scatter marker: x = date, y = machine, size = downtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub machine: String,
    pub failure_date: DateTime<Utc>,
    pub downtime_h: f64,
    pub cost_eur: f64,
    pub scrap_units: f64,
    pub size: f64,
    pub color: &'static str,
}

pub fn timeline_points<'a>(
    events: impl IntoIterator<Item = &'a MaintenanceEvent>,
    severe_downtime_h: f64,
) -> Vec<TimelinePoint> {
    events
        .into_iter()
        .map(|e| TimelinePoint {
            machine: e.machine.clone(),
            failure_date: e.failure_date,
            downtime_h: e.downtime_h,
            cost_eur: e.cost_eur,
            scrap_units: e.scrap_units,
            size: e.downtime_h,
            color: if e.is_severe(severe_downtime_h) { SEVERE_COLOR } else { MILD_COLOR },
        })
        .collect()
}
