//! Shared data structures for the maintenance dashboard
//!
//! - `KpiSummary`: one aggregated row per machine (cost, downtime, scrap)
//! - `MaintenanceEvent`: one row per recorded failure
//! - `FeatureVector`, `RiskPrediction`, `RiskTier`: derived risk outputs
//! - `MachineFilter`: the operator's machine selection

mod kpi;
mod event;
mod risk;
mod filter;

pub use kpi::*;
pub use event::*;
pub use risk::*;
pub use filter::*;
