use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::form::FormSpec;
use crate::listing::RawListing;
use crate::model::RiskScorer;
use crate::pipeline::{self, PredictOutcome};

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// Shared, read-only request state. The scorer is loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<dyn RiskScorer>,
}

impl AppState {
    pub fn new(scorer: Arc<dyn RiskScorer>) -> Self {
        Self { scorer }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        .route("/form", get(form))
        .route("/model", get(model_info))
        .route("/predict", post(predict))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn form() -> Json<FormSpec> {
    Json(FormSpec::current())
}

#[derive(Serialize)]
struct ModelInfo {
    classifier: String,
    features: Vec<String>,
}

async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(ModelInfo {
        classifier: state.scorer.kind().to_string(),
        features: state.scorer.feature_names().to_vec(),
    })
}

#[derive(Serialize)]
struct PredictResp {
    #[serde(flatten)]
    outcome: PredictOutcome,
    assessed_at: DateTime<Utc>,
}

async fn predict(
    State(state): State<AppState>,
    Json(listing): Json<RawListing>,
) -> Json<PredictResp> {
    let outcome = pipeline::predict(&listing, state.scorer.as_ref());
    Json(PredictResp {
        outcome,
        assessed_at: Utc::now(),
    })
}
