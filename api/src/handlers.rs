use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use shared::ContactResponse;

use crate::{
    client_ip::client_ip,
    email_template, metrics, spam,
    error::{ApiError, ApiResult},
    mailer::OutboundEmail,
    state::AppState,
    validation::{errors_by_field, form::sanitize_draft, ContactForm},
};

const MSG_SENT: &str =
    "Votre demande a été envoyée avec succès. Nous vous répondrons dans les plus brefs délais.";
const MSG_SAVED: &str =
    "Votre demande a été enregistrée. Nous vous répondrons dans les plus brefs délais.";
const MSG_RATE_LIMITED: &str =
    "Trop de demandes depuis votre adresse IP. Veuillez réessayer dans 1 heure.";
const MSG_INVALID: &str = "Veuillez corriger les erreurs dans le formulaire.";
const MSG_TECHNICAL: &str =
    "Une erreur est survenue lors de l'envoi. Veuillez réessayer plus tard.";

/// Submission pipeline: honeypot → rate limit → validate → sanitize →
/// persist → notify. Every branch terminates in a well-formed
/// `ContactResponse`; only persistence failure is reported as technical.
pub async fn submit_contact(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Response {
    let Json(form) = match payload {
        Ok(json) => json,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::rejected(format!(
                    "Requête invalide: {}",
                    err.body_text()
                ))),
            )
                .into_response();
        }
    };

    let ip = client_ip(&headers, connect_info.map(|c| c.0));

    // Honeypot: disguised as success so bots cannot tell they were caught.
    if spam::honeypot_tripped(&form.honey) {
        tracing::info!(ip = %ip, "honeypot tripped, returning fake success");
        metrics::HONEYPOT_TRIPS.inc();
        spam::honeypot_delay(&state.config.spam).await;
        return (StatusCode::OK, Json(ContactResponse::ok(MSG_SENT))).into_response();
    }

    // Rate limit against persisted submissions, sliding 1h window.
    match spam::rate_limit_allows(state.store.as_ref(), &ip, &state.config.spam).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(ip = %ip, "submission rejected, rate limit reached");
            metrics::record_rejection("rate_limited");
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ContactResponse::rejected(MSG_RATE_LIMITED)),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!(ip = %ip, error = ?err, "rate limit query failed");
            metrics::DB_QUERY_ERRORS.inc();
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::rejected(MSG_TECHNICAL)),
            )
                .into_response();
        }
    }

    // Total validation: all field violations reported in one pass.
    let mut draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            metrics::record_rejection("validation");
            return (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::invalid(MSG_INVALID, errors_by_field(errors))),
            )
                .into_response();
        }
    };

    sanitize_draft(&mut draft);

    let record = match state.store.insert_contact_request(&draft, &ip).await {
        Ok(record) => record,
        Err(err) => {
            tracing::error!(ip = %ip, error = ?err, "failed to persist contact request");
            metrics::DB_QUERY_ERRORS.inc();
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::rejected(MSG_TECHNICAL)),
            )
                .into_response();
        }
    };

    metrics::SUBMISSIONS_TOTAL.inc();
    tracing::info!(
        id = %record.id,
        service_type = %record.service_type,
        "contact request persisted"
    );

    let email = OutboundEmail {
        from: state.config.mail.sender.clone(),
        to: state.config.mail.recipient.clone(),
        reply_to: record.email.clone(),
        subject: email_template::subject(&record),
        html: email_template::render_contact_email(&record),
    };

    // Notification failure never rolls back the record and never surfaces
    // to the requester; the persisted row is the source of truth.
    match state.mailer.send(&email).await {
        Ok(()) => {
            metrics::EMAILS_SENT.inc();
            (StatusCode::OK, Json(ContactResponse::ok(MSG_SENT))).into_response()
        }
        Err(err) => {
            tracing::error!(id = %record.id, error = %err, "notification dispatch failed");
            metrics::EMAIL_FAILURES.inc();
            (StatusCode::OK, Json(ContactResponse::ok(MSG_SAVED))).into_response()
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    let db_ok = state.store.ping().await.is_ok();

    if db_ok {
        tracing::info!(uptime_secs = uptime, "health check passed");
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime
            })),
        )
    } else {
        tracing::warn!(uptime_secs = uptime, "health check degraded, db unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime
            })),
        )
    }
}

/// Submission counters for the operator; no request content is exposed.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let (total, last_24h) = state.store.submission_stats().await.map_err(|err| {
        tracing::error!(error = ?err, "stats query failed");
        metrics::DB_QUERY_ERRORS.inc();
        ApiError::from(err)
    })?;

    Ok(Json(json!({
        "total_requests": total,
        "requests_last_24h": last_24h,
    })))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
