//! Spam guard: honeypot + per-IP rate limiting.
//!
//! Both checks run before validation. The honeypot branch deliberately
//! disguises itself as a success so automated clients cannot distinguish
//! rejection from acceptance; the artificial delay keeps the response
//! timing close to a real submission.

use std::time::Duration;

use rand::Rng;

use crate::config::SpamConfig;
use crate::repository::ContactStore;

/// A non-empty honeypot value means the form was filled by a machine.
pub fn honeypot_tripped(honey: &str) -> bool {
    !honey.trim().is_empty()
}

/// Sleep for the configured honeypot delay, plus up to 25% jitter so the
/// fake-success latency is not a constant fingerprint.
pub async fn honeypot_delay(config: &SpamConfig) {
    let base = config.honeypot_delay;
    let jitter_ms = if base.is_zero() {
        0
    } else {
        rand::thread_rng().gen_range(0..=base.as_millis() as u64 / 4)
    };
    tokio::time::sleep(base + Duration::from_millis(jitter_ms)).await;
}

/// Sliding-window rate limit, counted against persisted submissions:
/// returns `true` when another submission from `ip` may proceed.
///
/// The window is computed at request time as `now - window`, so the check
/// and the subsequent insert rely only on the datastore's atomic count and
/// insert; no in-process state is kept.
pub async fn rate_limit_allows(
    store: &dyn ContactStore,
    ip: &str,
    config: &SpamConfig,
) -> Result<bool, sqlx::Error> {
    let recent = store.count_recent_from_ip(ip, config.rate_limit_window).await?;
    Ok(recent < config.rate_limit_max_per_window as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::{ContactDraft, ContactRequest};
    use std::time::Instant;

    struct FixedCountStore(i64);

    #[async_trait]
    impl ContactStore for FixedCountStore {
        async fn ping(&self) -> Result<(), sqlx::Error> {
            Ok(())
        }

        async fn insert_contact_request(
            &self,
            _draft: &ContactDraft,
            _ip_address: &str,
        ) -> Result<ContactRequest, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn count_recent_from_ip(
            &self,
            _ip_address: &str,
            _window: Duration,
        ) -> Result<i64, sqlx::Error> {
            Ok(self.0)
        }

        async fn submission_stats(&self) -> Result<(i64, i64), sqlx::Error> {
            Ok((0, 0))
        }
    }

    fn config() -> SpamConfig {
        SpamConfig {
            rate_limit_max_per_window: 3,
            rate_limit_window: Duration::from_secs(3600),
            honeypot_delay: Duration::from_millis(50),
        }
    }

    #[test]
    fn test_honeypot_detection() {
        assert!(!honeypot_tripped(""));
        assert!(!honeypot_tripped("   "));
        assert!(honeypot_tripped("http://spam.example"));
        assert!(honeypot_tripped("x"));
    }

    #[tokio::test]
    async fn test_honeypot_delay_at_least_base() {
        let start = Instant::now();
        honeypot_delay(&config()).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_zero_delay_returns_quickly() {
        let mut config = config();
        config.honeypot_delay = Duration::ZERO;

        let start = Instant::now();
        honeypot_delay(&config).await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rate_limit_refuses_at_exactly_the_cap() {
        let config = config();
        assert!(rate_limit_allows(&FixedCountStore(0), "203.0.113.10", &config)
            .await
            .unwrap());
        assert!(rate_limit_allows(&FixedCountStore(2), "203.0.113.10", &config)
            .await
            .unwrap());
        assert!(!rate_limit_allows(&FixedCountStore(3), "203.0.113.10", &config)
            .await
            .unwrap());
        assert!(!rate_limit_allows(&FixedCountStore(7), "203.0.113.10", &config)
            .await
            .unwrap());
    }
}
