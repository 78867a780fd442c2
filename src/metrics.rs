use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and describe the
    /// prediction series so they show up on `/metrics` before first use.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| -> anyhow::Result<PrometheusHandle> {
                let handle = PrometheusBuilder::new().install_recorder()?;
                describe_counter!("predictions_total", "Listings scored, by verdict.");
                describe_counter!(
                    "prediction_errors_total",
                    "Listings whose scoring failed (shown as an error report)."
                );
                describe_histogram!(
                    "prediction_probability",
                    "Fraud probability of scored listings, 0..1."
                );
                Ok(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
