//! # Predict pipeline
//! extract → score → report, with the single catch point for scoring errors.
//!
//! Feature-level problems never get here (they default to 0). Scoring
//! failures are turned into an `Error: ...` message with probability 0 so the
//! form always has something to display.

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{info, warn};

use crate::features::{vector_from_signals, FeatureVector};
use crate::listing::RawListing;
use crate::model::{RiskScorer, ScoreError};
use crate::report::{report_from_signals, RiskReport};
use crate::signals::Signals;

/// Successful evaluation of one listing.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub features: FeatureVector,
    pub report: RiskReport,
}

/// What the presentation layer shows: narrative + risk score readout.
#[derive(Debug, Clone, Serialize)]
pub struct PredictOutcome {
    /// Markdown report, or `Error: ...` when scoring failed.
    pub report: String,
    /// Fraud probability in percent; 0 on error.
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
}

/// Evaluate a listing, propagating scoring errors.
pub fn assess(raw: &RawListing, scorer: &dyn RiskScorer) -> Result<Assessment, ScoreError> {
    let signals = Signals::evaluate(raw);
    let features = vector_from_signals(&signals, scorer.feature_names());
    let prediction = scorer.score(&features)?;
    let report = report_from_signals(&signals, prediction);
    Ok(Assessment { features, report })
}

/// Evaluate a listing for display. Never fails.
pub fn predict(raw: &RawListing, scorer: &dyn RiskScorer) -> PredictOutcome {
    let id = anon_hash(&raw.description);
    match assess(raw, scorer) {
        Ok(a) => {
            info!(
                target: "prediction",
                %id,
                verdict = a.report.verdict.as_str(),
                probability = a.report.probability_pct,
                factors = a.report.matched.len(),
                "listing assessed"
            );
            counter!("predictions_total", "verdict" => a.report.verdict.as_str()).increment(1);
            histogram!("prediction_probability").record(a.report.probability_pct / 100.0);
            PredictOutcome {
                report: a.report.to_markdown(),
                probability: a.report.probability_pct,
                assessment: Some(a),
            }
        }
        Err(e) => {
            warn!(target: "prediction", %id, error = %e, "scoring failed");
            counter!("prediction_errors_total").increment(1);
            PredictOutcome {
                report: format!("Error: {e}"),
                probability: 0.0,
                assessment: None,
            }
        }
    }
}

/// Short, non-reversible id for log correlation. Raw listing text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
