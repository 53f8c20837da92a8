//! Serialized classifier artifact.
//!
//! The artifact is a JSON export of a fitted scikit-learn style binary
//! classifier. Random forests keep sklearn's flat tree arrays
//! (`children_left`, `children_right`, `feature`, `threshold`, `value`);
//! logistic regression keeps `coef` and `intercept`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ModelError;
use crate::types::{FEATURE_COUNT, FEATURE_NAMES};

/// Artifact format version understood by this build.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// sklearn's marker for "no child" on leaf nodes.
const TREE_LEAF: i64 = -1;

/// Anything that yields one probability per class for a feature row.
pub trait ProbabilisticClassifier: Send + Sync {
    /// Class labels the model was fit on, in probability-column order.
    fn classes(&self) -> &[i64];

    /// Probability row for a single sample, one entry per class.
    fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64>;
}

/// Complete model artifact as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Format version for forward compatibility.
    pub version: u32,
    /// Distinct labels seen during training (`classes_`).
    pub classes: Vec<i64>,
    /// Input column names, must match `FEATURE_NAMES`.
    pub feature_names: Vec<String>,
    pub model: Classifier,
}

/// Fitted estimator parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Classifier {
    RandomForest { trees: Vec<DecisionTree> },
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
}

/// One fitted tree in sklearn's array layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class counts (or weights), one column per class
    pub value: Vec<Vec<f64>>,
}

impl ModelArtifact {
    /// Read and validate an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self = serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Structural checks; prediction never indexes out of bounds once this passes.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.version != MODEL_FORMAT_VERSION {
            return Err(ModelError::Version(self.version));
        }
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::FeatureNames {
                found: self.feature_names.clone(),
                expected: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            });
        }
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(ModelError::Shape("model lists no classes".to_string()));
        }

        match &self.model {
            Classifier::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ModelError::Shape("random forest has no trees".to_string()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(n_classes)
                        .map_err(|e| ModelError::Shape(format!("tree {i}: {e}")))?;
                }
            }
            Classifier::LogisticRegression { coef, intercept } => {
                if n_classes != 2 {
                    return Err(ModelError::Shape(format!(
                        "logistic regression needs 2 classes, artifact lists {n_classes}"
                    )));
                }
                if coef.len() != FEATURE_COUNT {
                    return Err(ModelError::Shape(format!(
                        "logistic regression has {} coefficients, expected {FEATURE_COUNT}",
                        coef.len()
                    )));
                }
                if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::Shape("non-finite logistic regression weights".to_string()));
                }
            }
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for ModelArtifact {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        match &self.model {
            Classifier::RandomForest { trees } => {
                let mut proba = vec![0.0; self.classes.len()];
                for tree in trees {
                    for (acc, p) in proba.iter_mut().zip(tree.predict_proba(row)) {
                        *acc += p;
                    }
                }
                #[allow(clippy::cast_precision_loss)]
                let n = trees.len().max(1) as f64;
                proba.iter_mut().for_each(|p| *p /= n);
                proba
            }
            Classifier::LogisticRegression { coef, intercept } => {
                let z = coef.iter().zip(row).map(|(c, x)| c * x).sum::<f64>() + intercept;
                let p = sigmoid(z);
                vec![1.0 - p, p]
            }
        }
    }
}

impl DecisionTree {
    fn validate(&self, n_classes: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!(
                "node arrays differ in length (left={}, right={}, feature={}, threshold={}, value={})",
                n,
                self.children_right.len(),
                self.feature.len(),
                self.threshold.len(),
                self.value.len()
            ));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == TREE_LEAF {
                if right != TREE_LEAF {
                    return Err(format!("node {node} has only a right child"));
                }
                let counts = &self.value[node];
                if counts.len() != n_classes {
                    return Err(format!(
                        "leaf {node} has {} class values, expected {n_classes}",
                        counts.len()
                    ));
                }
                if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
                    return Err(format!("leaf {node} has negative or non-finite values"));
                }
                continue;
            }
            // sklearn numbers children after their parent, so walks always terminate
            for child in [left, right] {
                let in_range = usize::try_from(child).is_ok_and(|c| c > node && c < n);
                if !in_range {
                    return Err(format!("node {node} has invalid child index {child}"));
                }
            }
            let feature_ok = usize::try_from(self.feature[node]).is_ok_and(|f| f < FEATURE_COUNT);
            if !feature_ok {
                return Err(format!("node {node} splits on invalid feature {}", self.feature[node]));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {node} has a NaN threshold"));
            }
        }
        Ok(())
    }

    /// Normalised class distribution of the leaf reached by `row`.
    fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let feature = usize::try_from(self.feature[node]).unwrap_or(0);
            let next = if row[feature] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = usize::try_from(next).unwrap_or(node);
        }

        let counts = &self.value[node];
        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            counts.iter().map(|c| c / total).collect()
        } else {
            #[allow(clippy::cast_precision_loss)]
            let uniform = 1.0 / counts.len().max(1) as f64;
            vec![uniform; counts.len()]
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
