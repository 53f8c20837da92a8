//! Risk readout shown under the prediction selector.

use serde::Serialize;

use crate::risk::{build_features, RiskError, RiskPredictor};
use crate::types::{FeatureVector, MaintenanceEvent, RiskTier};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReadout {
    pub machine: String,
    pub features: FeatureVector,
    pub percent: f64,
    pub tier: RiskTier,
    pub color: &'static str,
    pub horizon_days: u32,
}

/// Build features for `machine` and run the predictor.
pub fn risk_readout(
    events: &[MaintenanceEvent],
    machine: &str,
    predictor: &RiskPredictor,
    window_days: u32,
    horizon_days: u32,
) -> Result<RiskReadout, RiskError> {
    let features = build_features(events, machine, window_days)?;
    let prediction = predictor.predict(&features)?;
    tracing::debug!(
        machine,
        percent = prediction.percent,
        tier = %prediction.tier,
        "Risk readout"
    );
    Ok(RiskReadout {
        machine: machine.to_string(),
        features,
        percent: prediction.percent,
        tier: prediction.tier,
        color: prediction.tier.color(),
        horizon_days,
    })
}
