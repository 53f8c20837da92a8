//! Dashboard Configuration Module
//!
//! Input file locations, risk thresholds and the HTTP bind address, loaded
//! from a TOML file.
//!
//! ## Loading Order
//!
//! 1. `MAINTENANCE_CONFIG` environment variable (path to TOML file)
//! 2. `maintenance.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded [`MaintenanceConfig`] is passed explicitly to whoever needs it;
//! there is no process-wide config singleton.

mod maintenance_config;
pub mod defaults;

pub use maintenance_config::*;
