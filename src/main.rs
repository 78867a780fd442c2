//! Internship Fraud Detector — Binary Entrypoint
//! Loads the model artifacts once, then serves the form and the predict API.

use internship_fraud_detector::{build_app, config::AppConfig};
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Structured logs: `RUST_LOG` filter (defaults to this crate at info),
/// `LOG_FORMAT=json` for JSON lines, compact text otherwise.
/// A subscriber installed by the runtime takes precedence.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("internship_fraud_detector=info,prediction=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Missing or inconsistent artifacts abort startup here.
    let cfg = AppConfig::from_env()?;
    info!(dir = %cfg.artifacts.dir.display(), "loading model artifacts");
    let router = build_app(&cfg)?;

    Ok(router.into())
}
