//! Dashboard view models
//!
//! Serializable building blocks for the single-page dashboard:
//! - `selector`: machine selector options ("All" + machines)
//! - `charts`: cost / downtime / scrap bar series per machine
//! - `timeline`: failure scatter coloured by downtime severity
//! - `readout`: the 7-day failure-risk percentage and its colour
//!
//! Everything here is a pure function of the loaded [`Dataset`](crate::data::Dataset)
//! and the current [`MachineFilter`](crate::types::MachineFilter).

mod charts;
mod readout;
mod selector;
mod timeline;

pub use charts::{kpi_charts, Bar, KpiBarChart, KpiMetric};
pub use readout::{risk_readout, RiskReadout};
pub use selector::{machine_options, prediction_options};
pub use timeline::{timeline_points, TimelinePoint, MILD_COLOR, SEVERE_COLOR};
