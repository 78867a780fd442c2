//! Feature scalers replayed at inference time.
//!
//! JSON shape (tagged by `kind`):
//! ```json
//! { "kind": "standard", "mean": [..], "scale": [..] }
//! { "kind": "min_max", "min": [..], "scale": [..] }
//! ```
//! `standard` computes `(x - mean) / scale`; `min_max` computes
//! `x * scale + min` (the fitted `min_` offset and `scale_` factor).

use serde::{Deserialize, Serialize};

use super::ScoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    /// Number of columns the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Self::Standard { mean, .. } => mean.len(),
            Self::MinMax { min, .. } => min.len(),
        }
    }

    /// Check internal consistency after deserialization.
    pub fn validate(&self) -> Result<(), ScoreError> {
        let (a, b) = match self {
            Self::Standard { mean, scale } => (mean.len(), scale.len()),
            Self::MinMax { min, scale } => (min.len(), scale.len()),
        };
        if a != b {
            return Err(ScoreError::ShapeMismatch {
                what: "scaler parameters",
                expected: a,
                actual: b,
            });
        }
        Ok(())
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, ScoreError> {
        let n = self.n_features();
        if x.len() != n {
            return Err(ScoreError::ShapeMismatch {
                what: "scaler input",
                expected: n,
                actual: x.len(),
            });
        }
        let out = match self {
            Self::Standard { mean, scale } => x
                .iter()
                .zip(mean)
                .zip(scale)
                // zero-variance columns were fitted with scale 1
                .map(|((v, m), s)| if *s == 0.0 { v - m } else { (v - m) / s })
                .collect(),
            Self::MinMax { min, scale } => x
                .iter()
                .zip(min)
                .zip(scale)
                .map(|((v, m), s)| v * s + m)
                .collect(),
        };
        Ok(out)
    }
}
