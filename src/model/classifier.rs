//! Binary classifiers loaded from JSON.
//!
//! Class index 1 is the fraudulent class. Two shapes are understood:
//! - `logistic_regression`: `{ "coef": [..], "intercept": f }`. Label is
//!   `decision > 0`, probability is the logistic of the decision value.
//! - `random_forest`: `{ "n_features": n, "trees": [..] }` where each tree uses
//!   the flat node arrays of a fitted CART tree (`children_left`,
//!   `children_right`, `feature`, `threshold`, `value`; leaves have
//!   `children_left == -1`). Probability is the mean of the per-tree leaf
//!   class distributions; label is the arg-max (ties go to class 0).

use serde::{Deserialize, Serialize};

use super::ScoreError;

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    RandomForest { n_features: usize, trees: Vec<DecisionTree> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[legitimate, fraudulent]`.
    pub value: Vec<[f64; 2]>,
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::RandomForest { .. } => "random_forest",
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression { coef, .. } => coef.len(),
            Self::RandomForest { n_features, .. } => *n_features,
        }
    }

    /// Structural checks run once at load time so scoring never indexes out
    /// of bounds.
    pub fn validate(&self) -> Result<(), ScoreError> {
        match self {
            Self::LogisticRegression { coef, .. } => {
                if coef.is_empty() {
                    return Err(ScoreError::EmptyModel("logistic regression has no coefficients"));
                }
                Ok(())
            }
            Self::RandomForest { n_features, trees } => {
                if trees.is_empty() {
                    return Err(ScoreError::EmptyModel("random forest has no trees"));
                }
                trees.iter().try_for_each(|t| t.validate(*n_features))
            }
        }
    }

    /// Signed decision value; positive means fraudulent.
    fn decision(&self, x: &[f64]) -> f64 {
        match self {
            Self::LogisticRegression { coef, intercept } => {
                coef.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + intercept
            }
            Self::RandomForest { .. } => {
                let [p0, p1] = self.class_probabilities(x);
                p1 - p0
            }
        }
    }

    fn class_probabilities(&self, x: &[f64]) -> [f64; 2] {
        match self {
            Self::LogisticRegression { .. } => {
                let p = sigmoid(self.decision(x));
                [1.0 - p, p]
            }
            Self::RandomForest { trees, .. } => {
                let mut acc = [0.0, 0.0];
                for t in trees {
                    let [a, b] = t.leaf_distribution(x);
                    acc[0] += a;
                    acc[1] += b;
                }
                let n = trees.len() as f64;
                [acc[0] / n, acc[1] / n]
            }
        }
    }

    fn check_input(&self, x: &[f64]) -> Result<(), ScoreError> {
        let n = self.n_features();
        if x.len() != n {
            return Err(ScoreError::ShapeMismatch {
                what: "classifier input",
                expected: n,
                actual: x.len(),
            });
        }
        Ok(())
    }

    /// Hard label: 1 = fraudulent, 0 = legitimate.
    pub fn predict(&self, x: &[f64]) -> Result<u8, ScoreError> {
        self.check_input(x)?;
        Ok(u8::from(self.decision(x) > 0.0))
    }

    /// Probability of the fraudulent class.
    pub fn predict_proba(&self, x: &[f64]) -> Result<f64, ScoreError> {
        self.check_input(x)?;
        Ok(self.class_probabilities(x)[1])
    }
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), ScoreError> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(ScoreError::EmptyModel("decision tree has no nodes"));
        }
        for (what, len) in [
            ("tree children_right", self.children_right.len()),
            ("tree feature", self.feature.len()),
            ("tree threshold", self.threshold.len()),
            ("tree value", self.value.len()),
        ] {
            if len != n {
                return Err(ScoreError::ShapeMismatch {
                    what,
                    expected: n,
                    actual: len,
                });
            }
        }
        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l == LEAF {
                continue;
            }
            // children always come after their parent in fitted trees
            let in_range = |c: i64| c > i as i64 && (c as usize) < n;
            if !in_range(l) || !in_range(r) {
                return Err(ScoreError::MalformedModel(format!(
                    "node {i} has child out of range ({l}, {r})"
                )));
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(ScoreError::MalformedModel(format!(
                    "node {i} splits on feature {f}, model has {n_features}"
                )));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf `x` falls into.
    fn leaf_distribution(&self, x: &[f64]) -> [f64; 2] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [a, b] = self.value[node];
        let total = a + b;
        if total <= 0.0 {
            [0.5, 0.5]
        } else {
            [a / total, b / total]
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
