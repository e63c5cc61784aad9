mod client_ip;
mod config;
mod email_template;
mod error;
mod handlers;
mod mailer;
mod metrics;
mod metrics_handler;
mod observability;
mod repository;
mod routes;
mod spam;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::mailer::ResendMailer;
use crate::observability::Observability;
use crate::repository::PgContactStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;

    let config = AppConfig::from_env()?;

    // Database connection: opened once here, shared through AppState.
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.connection_string)
        .await?;

    sqlx::migrate!("../migrations").run(&pool).await?;

    tracing::info!("Database connected and migrations applied");

    let store = Arc::new(PgContactStore::new(pool));
    let mailer = Arc::new(ResendMailer::new(config.mail.resend_api_key.clone()));

    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(&config.site_origin)?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let port = config.port;
    let state = AppState::new(store, config, mailer, obs.registry);

    // Build router
    let app = Router::new()
        .merge(routes::contact_routes())
        .merge(routes::health_routes())
        .merge(routes::observability_routes())
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(observability::request_logger))
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Contact API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
