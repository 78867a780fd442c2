// src/model/mod.rs
//! Risk scoring: the pre-trained scaler + classifier pair behind the
//! `RiskScorer` capability.
//!
//! Artifacts are read once at startup (`ModelArtifacts::load`) and never
//! mutated afterwards; share them via `Arc`.

pub mod classifier;
pub mod scaler;

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::app::ArtifactsConfig;
use crate::features::FeatureVector;

pub use classifier::{Classifier, DecisionTree};
pub use scaler::Scaler;

/// Binary verdict of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Legitimate,
    Fraudulent,
}

impl Verdict {
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Self::Fraudulent
        } else {
            Self::Legitimate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legitimate => "legitimate",
            Self::Fraudulent => "fraudulent",
        }
    }
}

/// Classifier output for one listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub verdict: Verdict,
    /// Probability of the fraudulent class, in [0, 1].
    pub probability: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("{what}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("feature `{0}` is not a finite number")]
    NonFinite(String),
    #[error("feature order mismatch at position {position}: model expects `{expected}`, got `{actual}`")]
    FeatureOrder {
        position: usize,
        expected: String,
        actual: String,
    },
    #[error("empty model: {0}")]
    EmptyModel(&'static str),
    #[error("malformed model: {0}")]
    MalformedModel(String),
}

/// Injected scoring capability. Implementations must be pure with respect to
/// shared state: concurrent calls see the same read-only model.
pub trait RiskScorer: Send + Sync {
    /// Feature names (and order) the scorer expects.
    fn feature_names(&self) -> &[String];

    /// Short model description for diagnostics.
    fn kind(&self) -> &str {
        "custom"
    }

    fn score(&self, features: &FeatureVector) -> Result<Prediction, ScoreError>;
}

/// The three startup artifacts, validated against each other.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    feature_names: Vec<String>,
    scaler: Scaler,
    classifier: Classifier,
}

impl ModelArtifacts {
    /// Assemble from in-memory parts; widths must agree.
    pub fn new(
        feature_names: Vec<String>,
        scaler: Scaler,
        classifier: Classifier,
    ) -> Result<Self, ScoreError> {
        scaler.validate()?;
        classifier.validate()?;
        let n = feature_names.len();
        if n == 0 {
            return Err(ScoreError::EmptyModel("feature name list is empty"));
        }
        if scaler.n_features() != n {
            return Err(ScoreError::ShapeMismatch {
                what: "scaler width vs feature names",
                expected: n,
                actual: scaler.n_features(),
            });
        }
        if classifier.n_features() != n {
            return Err(ScoreError::ShapeMismatch {
                what: "classifier width vs feature names",
                expected: n,
                actual: classifier.n_features(),
            });
        }
        Ok(Self {
            feature_names,
            scaler,
            classifier,
        })
    }

    /// Load and cross-check all artifacts. Any failure here is fatal for the
    /// process: the service must not start without a model.
    pub fn load(cfg: &ArtifactsConfig) -> anyhow::Result<Self> {
        let names_path = cfg.feature_names_path();
        let scaler_path = cfg.scaler_path();
        let model_path = cfg.model_path();

        let feature_names: Vec<String> = read_json(&names_path)?;
        let scaler: Scaler = read_json(&scaler_path)?;
        let classifier: Classifier = read_json(&model_path)?;

        let artifacts = Self::new(feature_names, scaler, classifier)
            .with_context(|| format!("artifacts in {} are inconsistent", cfg.dir.display()))?;

        info!(
            dir = %cfg.dir.display(),
            features = artifacts.feature_names.len(),
            classifier = artifacts.classifier.kind(),
            "model artifacts loaded"
        );
        Ok(artifacts)
    }
}

impl RiskScorer for ModelArtifacts {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn kind(&self) -> &str {
        self.classifier.kind()
    }

    fn score(&self, features: &FeatureVector) -> Result<Prediction, ScoreError> {
        if features.len() != self.feature_names.len() {
            return Err(ScoreError::ShapeMismatch {
                what: "feature vector",
                expected: self.feature_names.len(),
                actual: features.len(),
            });
        }
        for (position, (got, want)) in features.names().iter().zip(&self.feature_names).enumerate()
        {
            if got != want {
                return Err(ScoreError::FeatureOrder {
                    position,
                    expected: want.clone(),
                    actual: got.clone(),
                });
            }
        }
        if let Some((name, _)) = features.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScoreError::NonFinite(name.to_string()));
        }

        let scaled = self.scaler.transform(features.values())?;
        let label = self.classifier.predict(&scaled)?;
        let probability = self.classifier.predict_proba(&scaled)?;

        Ok(Prediction {
            verdict: Verdict::from_label(label),
            probability: probability.clamp(0.0, 1.0),
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read artifact {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse artifact {}", path.display()))
}

/// Write artifacts as JSON; used by tests and tooling that export a model.
pub fn write_artifacts(dir: &Path, artifacts: &ModelArtifacts) -> anyhow::Result<()> {
    let cfg = ArtifactsConfig::in_dir(dir);
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    fs::write(
        cfg.feature_names_path(),
        serde_json::to_vec_pretty(&artifacts.feature_names)?,
    )?;
    fs::write(cfg.scaler_path(), serde_json::to_vec_pretty(&artifacts.scaler)?)?;
    fs::write(cfg.model_path(), serde_json::to_vec_pretty(&artifacts.classifier)?)?;
    Ok(())
}
