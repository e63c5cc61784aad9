use anyhow::Result;
use axum::extract::MatchedPath;
use axum::middleware::Next;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::metrics;

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    pub fn init() -> Result<Self> {
        let registry = Registry::new_custom(Some("flux".into()), None)?;
        metrics::register_all(&registry)?;
        metrics::mark_process_start();

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "api=debug,tower_http=debug".into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();

        tracing::info!("Observability stack initialized (tracing + Prometheus)");
        Ok(Self { registry })
    }
}

/// Per-request log line and HTTP metrics. Metrics are labelled with the
/// matched route template, not the raw path, so probe traffic against
/// non-existent routes cannot grow the label set.
pub async fn request_logger(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    metrics::observe_http(method.as_str(), &route, status, elapsed.as_secs_f64());
    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}
