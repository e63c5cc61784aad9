use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, metrics_handler, state::AppState};

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(handlers::submit_contact))
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/stats", get(handlers::get_stats))
}

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler::metrics_endpoint))
}
