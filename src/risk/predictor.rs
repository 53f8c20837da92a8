//! Risk predictor: wraps a classifier and turns its failure probability into a readout.

use std::path::Path;

use tracing::{debug, info};

use super::model::{ModelArtifact, ProbabilisticClassifier};
use super::{ModelError, RiskError};
use crate::types::{FeatureVector, RiskPrediction, RiskThresholds, RiskTier};

/// Label value that means "the machine failed within the horizon".
pub const FAILURE_LABEL: i64 = 1;

/// How the classifier's probability row maps onto the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLayout {
    /// Model was fit on one label only; the outcome is fixed.
    SingleClass(i64),
    /// Two labels; `failure_index` is the column holding `FAILURE_LABEL`.
    TwoClass { failure_index: usize },
}

impl ClassLayout {
    /// Resolve the layout from a model's class list.
    pub fn from_classes(classes: &[i64]) -> Result<Self, ModelError> {
        match classes {
            [label] => Ok(Self::SingleClass(*label)),
            [a, b] if a == b => Err(ModelError::Shape(format!("duplicate class label {a}"))),
            [_, _] => classes
                .iter()
                .position(|&c| c == FAILURE_LABEL)
                .map(|failure_index| Self::TwoClass { failure_index })
                .ok_or_else(|| {
                    ModelError::Shape(format!(
                        "two-class model {classes:?} has no failure label {FAILURE_LABEL}"
                    ))
                }),
            _ => Err(ModelError::Shape(format!(
                "expected 1 or 2 classes, model lists {}",
                classes.len()
            ))),
        }
    }

    fn width(self) -> usize {
        match self {
            Self::SingleClass(_) => 1,
            Self::TwoClass { .. } => 2,
        }
    }
}

/// Pre-trained failure classifier with its class layout resolved.
pub struct RiskPredictor {
    classifier: Box<dyn ProbabilisticClassifier>,
    layout: ClassLayout,
    thresholds: RiskThresholds,
}

impl std::fmt::Debug for RiskPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskPredictor")
            .field("layout", &self.layout)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

impl RiskPredictor {
    pub fn new(
        classifier: impl ProbabilisticClassifier + 'static,
        thresholds: RiskThresholds,
    ) -> Result<Self, ModelError> {
        let layout = ClassLayout::from_classes(classifier.classes())?;
        Ok(Self {
            classifier: Box::new(classifier),
            layout,
            thresholds,
        })
    }

    /// Load and validate a model artifact from disk.
    pub fn load(path: impl AsRef<Path>, thresholds: RiskThresholds) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let artifact = ModelArtifact::load(path)?;
        let predictor = Self::new(artifact, thresholds)?;
        info!(path = %path.display(), layout = ?predictor.layout, "Risk model loaded");
        Ok(predictor)
    }

    pub fn layout(&self) -> ClassLayout {
        self.layout
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Probability of failure in [0, 1].
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, RiskError> {
        match self.layout {
            ClassLayout::SingleClass(label) => Ok(if label == FAILURE_LABEL { 1.0 } else { 0.0 }),
            ClassLayout::TwoClass { failure_index } => {
                let proba = self.classifier.predict_proba(&features.as_row());
                if proba.len() != self.layout.width() {
                    return Err(RiskError::ModelShape {
                        expected: self.layout.width(),
                        got: proba.len(),
                    });
                }
                let p = proba[failure_index];
                // NaN maps to 0 rather than leaking into the readout
                Ok(if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) })
            }
        }
    }

    /// Failure risk as a percentage (2 decimals) plus its tier.
    pub fn predict(&self, features: &FeatureVector) -> Result<RiskPrediction, RiskError> {
        let percent = round_percent(self.probability(features)?);
        let tier = RiskTier::from_percent(percent, &self.thresholds);
        debug!(percent, tier = %tier, "Risk predicted");
        Ok(RiskPrediction { percent, tier })
    }
}

/// Probability to percent, rounded to 2 decimals and kept within [0, 100].
fn round_percent(probability: f64) -> f64 {
    ((probability * 100.0 * 100.0).round() / 100.0).clamp(0.0, 100.0)
}
