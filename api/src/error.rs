//! Error type for the operational endpoints (`/api/stats`, 404 fallback).
//!
//! The contact form never answers with this type; every form branch
//! terminates in a `ContactResponse` so the website can render the outcome
//! in French. This type covers the rest of the surface, where the caller is
//! an operator or a probe: the datastore detail stays in the logs and the
//! response carries a correlation id to find it.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("route not found")]
    RouteNotFound,
    #[error("datastore error: {0}")]
    Datastore(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: u16,
    timestamp: String,
    correlation_id: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Datastore(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::RouteNotFound => "RouteNotFound",
            ApiError::Datastore(_) => "DatastoreError",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::RouteNotFound => "The requested route does not exist",
            ApiError::Datastore(_) => "An unexpected database error occurred",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = Uuid::new_v4().to_string();
        let payload = ErrorResponse {
            error: self.kind().to_string(),
            message: self.public_message().to_string(),
            code: self.status().as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: correlation_id.clone(),
        };

        let mut response = (self.status(), Json(payload)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(header::HeaderName::from_static("x-correlation-id"), value);
        }
        response
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Datastore(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_datastore_detail_never_leaks() {
        let err = ApiError::Datastore(sqlx::Error::Protocol("secret dsn".into()));
        assert!(!err.public_message().contains("secret"));
    }

    #[test]
    fn test_response_carries_correlation_id() {
        let response = ApiError::RouteNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-correlation-id"));
    }
}
