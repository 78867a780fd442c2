// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod features;
pub mod form;
pub mod listing;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod signals;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::features::{extract, FeatureVector};
pub use crate::listing::RawListing;
pub use crate::model::{ModelArtifacts, Prediction, RiskScorer, ScoreError, Verdict};
pub use crate::pipeline::{assess, predict, Assessment, PredictOutcome};
pub use crate::report::{build_report, RiskBand, RiskReport};

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::config::AppConfig;

/// Load the artifacts named by `cfg` and build the full router
/// (form + API + `/metrics`). Fails if the model cannot be loaded, so the
/// service never starts without one.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let artifacts = ModelArtifacts::load(&cfg.artifacts)?;
    let state = AppState::new(Arc::new(artifacts));
    let metrics = crate::metrics::Metrics::init()?;
    info!("router ready");
    Ok(create_router(state).merge(metrics.router()))
}
