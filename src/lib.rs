//! Smart Maintenance: workshop KPI dashboard and failure-risk readout
//!
//! ## Architecture
//!
//! - **Data Loader** (`data`): reads the KPI summary and event history CSVs
//!   into an immutable [`Dataset`]
//! - **Risk Feature Builder** (`risk::build_features`): 7-day rolling
//!   features relative to a machine's latest failure
//! - **Risk Predictor** (`risk::RiskPredictor`): pre-trained classifier with
//!   the single-class degenerate case resolved at load time
//! - **Presentation** (`dashboard`, `api`): view models and the HTTP surface
//!   behind the single-page dashboard

pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod risk;
pub mod types;

// Re-export configuration
pub use config::MaintenanceConfig;

// Re-export loader
pub use data::{Dataset, LoadError};

// Re-export risk components
pub use risk::{build_features, ClassLayout, ModelArtifact, ModelError, RiskError, RiskPredictor};

// Re-export commonly used types
pub use types::{
    FeatureVector, KpiSummary, KpiTotals, MachineFilter, MaintenanceEvent, RiskPrediction,
    RiskThresholds, RiskTier,
};
