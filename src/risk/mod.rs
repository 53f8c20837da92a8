//! Failure-risk estimation
//!
//! Two stateless steps run on every prediction request:
//!
//! 1. [`build_features`]: summarise a machine's failures in the window
//!    before its most recent event into a [`FeatureVector`](crate::types::FeatureVector)
//! 2. [`RiskPredictor::predict`]: run the pre-trained classifier and map the
//!    failure probability to a percentage and [`RiskTier`](crate::types::RiskTier)
//!
//! The classifier is loaded from a JSON [`ModelArtifact`]; its class layout
//! (single-class degenerate model vs. two-class model) is resolved once when
//! the predictor is built.

mod features;
mod model;
mod predictor;

pub use features::build_features;
pub use model::{Classifier, DecisionTree, ModelArtifact, ProbabilisticClassifier, MODEL_FORMAT_VERSION};
pub use predictor::{ClassLayout, RiskPredictor, FAILURE_LABEL};

use std::path::PathBuf;
use thiserror::Error;

/// Per-request risk errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RiskError {
    /// The machine has no recorded events, so there is no reference point.
    #[error("no prediction available: machine '{machine}' has no recorded events")]
    InsufficientHistory { machine: String },

    /// The classifier returned a probability row of the wrong width.
    #[error("model returned {got} probability columns, expected {expected}")]
    ModelShape { expected: usize, got: usize },
}

/// Model artifact load or validation failure.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported model artifact version {0} (expected {})", MODEL_FORMAT_VERSION)]
    Version(u32),

    #[error("model features {found:?} do not match the expected inputs {expected:?}")]
    FeatureNames {
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("invalid model shape: {0}")]
    Shape(String),
}
