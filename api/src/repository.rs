//! Persistence gateway for `contact_requests`.
//!
//! The gateway is a trait, like [`crate::mailer::Mailer`], so the
//! orchestrator can be exercised against an in-memory store;
//! `PgContactStore` is the Postgres implementation wired up at startup.
//! Datastore failures are surfaced as `sqlx::Error` so the orchestrator can
//! log the detail and report a generic technical-failure message.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use shared::{ContactDraft, ContactRequest};
use sqlx::PgPool;

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Append a submission as a new durable record. `status` is always
    /// `NEW` and `created_at` is set by the datastore clock.
    async fn insert_contact_request(
        &self,
        draft: &ContactDraft,
        ip_address: &str,
    ) -> Result<ContactRequest, sqlx::Error>;

    /// Count submissions from `ip_address` inside the trailing window.
    async fn count_recent_from_ip(
        &self,
        ip_address: &str,
        window: Duration,
    ) -> Result<i64, sqlx::Error>;

    /// Operator-facing counters for `GET /api/stats`.
    async fn submission_stats(&self) -> Result<(i64, i64), sqlx::Error>;
}

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }

    async fn insert_contact_request(
        &self,
        draft: &ContactDraft,
        ip_address: &str,
    ) -> Result<ContactRequest, sqlx::Error> {
        sqlx::query_as::<_, ContactRequest>(
            r#"
            INSERT INTO contact_requests
            (service_type, designation, name, email, phone, company, message, budget, ip_address, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'NEW')
            RETURNING *
            "#,
        )
        .bind(draft.service_type.wire_name())
        .bind(&draft.designation)
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.company)
        .bind(&draft.message)
        .bind(draft.budget.wire_name())
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_recent_from_ip(
        &self,
        ip_address: &str,
        window: Duration,
    ) -> Result<i64, sqlx::Error> {
        let window_start =
            Utc::now() - chrono::Duration::from_std(window).unwrap_or(chrono::Duration::hours(1));

        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_requests WHERE ip_address = $1 AND created_at >= $2",
        )
        .bind(ip_address)
        .bind(window_start)
        .fetch_one(&self.pool)
        .await
    }

    async fn submission_stats(&self) -> Result<(i64, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_requests")
            .fetch_one(&self.pool)
            .await?;

        let last_24h: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contact_requests WHERE created_at >= now() - interval '24 hours'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((total, last_24h))
    }
}
