//! Failure-risk features and prediction results.

use serde::{Deserialize, Serialize};

/// Number of model input features.
pub const FEATURE_COUNT: usize = 4;

/// Model input columns, in the order the classifier was fit on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "avg_downtime_7d",
    "avg_cost_7d",
    "avg_scrap_7d",
    "days_since_last",
];

/// Rolling-window summary of a machine's recent failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Mean downtime of the events in the window (hours)
    pub avg_downtime_7d: f64,
    /// Mean cost of the events in the window (EUR)
    pub avg_cost_7d: f64,
    /// Mean scrap of the events in the window (units)
    pub avg_scrap_7d: f64,
    /// Whole days between the latest event and the newest event in the window
    pub days_since_last: u32,
}

impl FeatureVector {
    /// Feature row in `FEATURE_NAMES` order.
    pub fn as_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.avg_downtime_7d,
            self.avg_cost_7d,
            self.avg_scrap_7d,
            f64::from(self.days_since_last),
        ]
    }
}

/// Discrete risk bucket shown to the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RiskTier {
    /// Bucket a percentage using the configured thresholds.
    pub fn from_percent(percent: f64, thresholds: &RiskThresholds) -> Self {
        if percent < thresholds.medium_pct {
            RiskTier::Low
        } else if percent < thresholds.high_pct {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    /// Readout colour.
    pub fn color(self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Medium => "orange",
            RiskTier::High => "red",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Medium => write!(f, "MEDIUM"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// Tier boundaries in percent. `medium_pct` starts Medium, `high_pct` starts High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium_pct: f64,
    pub high_pct: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_pct: 30.0,
            high_pct: 60.0,
        }
    }
}

/// Failure probability over the prediction horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Probability in percent, within [0, 100], rounded to 2 decimals
    pub percent: f64,
    pub tier: RiskTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        let t = RiskThresholds::default();
        assert_eq!(RiskTier::from_percent(0.0, &t), RiskTier::Low);
        assert_eq!(RiskTier::from_percent(29.99, &t), RiskTier::Low);
        assert_eq!(RiskTier::from_percent(30.0, &t), RiskTier::Medium);
        assert_eq!(RiskTier::from_percent(59.99, &t), RiskTier::Medium);
        assert_eq!(RiskTier::from_percent(60.0, &t), RiskTier::High);
        assert_eq!(RiskTier::from_percent(100.0, &t), RiskTier::High);
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(RiskTier::Low.color(), "green");
        assert_eq!(RiskTier::Medium.color(), "orange");
        assert_eq!(RiskTier::High.color(), "red");
    }

    #[test]
    fn test_feature_row_order() {
        let f = FeatureVector {
            avg_downtime_7d: 4.0,
            avg_cost_7d: 200.0,
            avg_scrap_7d: 2.0,
            days_since_last: 7,
        };
        assert_eq!(f.as_row(), [4.0, 200.0, 2.0, 7.0]);
    }
}
