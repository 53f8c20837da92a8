//! Maintenance Dashboard Configuration - operator-tunable TOML values
//!
//! Every section implements `Default` with the values the dashboard ships
//! with, so a missing file behaves exactly like an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::RiskThresholds;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a dashboard deployment.
///
/// Load with `MaintenanceConfig::load()` which searches:
/// 1. `$MAINTENANCE_CONFIG` env var
/// 2. `./maintenance.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceConfig {
    /// Input file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Feature window and tier thresholds
    #[serde(default)]
    pub risk: RiskConfig,

    /// Event timeline rendering
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl MaintenanceConfig {
    /// Load configuration using the standard search order:
    /// 1. `$MAINTENANCE_CONFIG` environment variable
    /// 2. `./maintenance.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./maintenance.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found - using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - The feature window must be the 7-day window the model was fit on
    /// - Tier thresholds must satisfy `0 <= medium < high <= 100`
    /// - The severe-downtime threshold must be non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();
        let r = &self.risk;

        if r.window_days != defaults::ROLLING_WINDOW_DAYS {
            errors.push(format!(
                "risk.window_days ({}) must be {} to match the model's *_7d features",
                r.window_days,
                defaults::ROLLING_WINDOW_DAYS
            ));
        }
        if r.horizon_days == 0 {
            errors.push("risk.horizon_days must be > 0".to_string());
        }
        if !(0.0..=100.0).contains(&r.medium_threshold_pct) {
            errors.push(format!(
                "risk.medium_threshold_pct ({}) must be within [0, 100]",
                r.medium_threshold_pct
            ));
        }
        if !(0.0..=100.0).contains(&r.high_threshold_pct) {
            errors.push(format!(
                "risk.high_threshold_pct ({}) must be within [0, 100]",
                r.high_threshold_pct
            ));
        }
        if r.medium_threshold_pct >= r.high_threshold_pct {
            errors.push(format!(
                "risk.medium_threshold_pct ({}) must be < risk.high_threshold_pct ({})",
                r.medium_threshold_pct, r.high_threshold_pct
            ));
        }
        if !(self.timeline.severe_downtime_h >= 0.0) {
            errors.push(format!(
                "timeline.severe_downtime_h ({}) must be >= 0",
                self.timeline.severe_downtime_h
            ));
        }
        if self.server.addr.trim().is_empty() {
            errors.push("server.addr must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

/// Where the input tables and model artifact live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_kpi_path")]
    pub kpi_path: PathBuf,
    #[serde(default = "default_events_path")]
    pub events_path: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_kpi_path() -> PathBuf {
    PathBuf::from(defaults::KPI_PATH)
}

fn default_events_path() -> PathBuf {
    PathBuf::from(defaults::EVENTS_PATH)
}

fn default_model_path() -> PathBuf {
    PathBuf::from(defaults::MODEL_PATH)
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            kpi_path: default_kpi_path(),
            events_path: default_events_path(),
            model_path: default_model_path(),
        }
    }
}

/// Risk feature window and readout thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskConfig {
    /// Lookback before the latest event (days)
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Prediction horizon shown next to the percentage (days)
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Percentage where Low becomes Medium
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold_pct: f64,
    /// Percentage where Medium becomes High
    #[serde(default = "default_high_threshold")]
    pub high_threshold_pct: f64,
}

fn default_window_days() -> u32 {
    defaults::ROLLING_WINDOW_DAYS
}

fn default_horizon_days() -> u32 {
    defaults::PREDICTION_HORIZON_DAYS
}

fn default_medium_threshold() -> f64 {
    defaults::MEDIUM_RISK_PCT
}

fn default_high_threshold() -> f64 {
    defaults::HIGH_RISK_PCT
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            horizon_days: default_horizon_days(),
            medium_threshold_pct: default_medium_threshold(),
            high_threshold_pct: default_high_threshold(),
        }
    }
}

impl RiskConfig {
    pub fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            medium_pct: self.medium_threshold_pct,
            high_pct: self.high_threshold_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineConfig {
    /// Downtime above this marks an event as severe (hours)
    #[serde(default = "default_severe_downtime")]
    pub severe_downtime_h: f64,
}

fn default_severe_downtime() -> f64 {
    defaults::SEVERE_DOWNTIME_H
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            severe_downtime_h: default_severe_downtime(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by the `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
