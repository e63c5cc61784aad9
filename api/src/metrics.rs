use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Registry,
    TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(
                HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()),
                $labels,
            )
            .unwrap()
        })
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
macro_rules! gauge {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntGauge::new($name, $help).unwrap())
    };
}

const LATENCY_BUCKETS: [f64; 11] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> =
    histogram_vec!("http_request_duration_seconds", "HTTP request latency", &["method", "path"]);

// ── Submissions ─────────────────────────────────────────────────────────────
pub static SUBMISSIONS_TOTAL: Lazy<IntCounter> =
    counter!("contact_submissions_total", "Contact requests persisted");
pub static SUBMISSIONS_REJECTED: Lazy<IntCounterVec> = counter_vec!(
    "contact_rejections_total",
    "Contact requests rejected before persistence",
    &["reason"]
);
pub static HONEYPOT_TRIPS: Lazy<IntCounter> =
    counter!("honeypot_trips_total", "Submissions silently dropped by the honeypot");

// ── Email ───────────────────────────────────────────────────────────────────
pub static EMAILS_SENT: Lazy<IntCounter> =
    counter!("emails_sent_total", "Notification emails dispatched");
pub static EMAIL_FAILURES: Lazy<IntCounter> =
    counter!("email_failures_total", "Notification emails that failed to dispatch");

// ── Database ────────────────────────────────────────────────────────────────
pub static DB_QUERY_ERRORS: Lazy<IntCounter> = counter!("db_query_errors_total", "DB query errors");

// ── System ──────────────────────────────────────────────────────────────────
pub static PROCESS_START_TIME: Lazy<IntGauge> =
    gauge!("process_start_time_seconds", "Process start time");

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(SUBMISSIONS_TOTAL.clone()))?;
    r.register(Box::new(SUBMISSIONS_REJECTED.clone()))?;
    r.register(Box::new(HONEYPOT_TRIPS.clone()))?;
    r.register(Box::new(EMAILS_SENT.clone()))?;
    r.register(Box::new(EMAIL_FAILURES.clone()))?;
    r.register(Box::new(DB_QUERY_ERRORS.clone()))?;
    r.register(Box::new(PROCESS_START_TIME.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_rejection(reason: &str) {
    SUBMISSIONS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record the process start time. Called once during startup.
pub fn mark_process_start() {
    let epoch_secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    PROCESS_START_TIME.set(epoch_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_registry() -> Registry {
        let r = Registry::new_custom(Some("t".into()), None).unwrap();
        register_all(&r).unwrap();
        r
    }

    #[test]
    fn test_http_request_counter() {
        let r = fresh_registry();
        observe_http("POST", "/api/contact", 200, 0.042);
        let out = gather_metrics(&r);
        assert!(out.contains("http_requests_total"));
        assert!(out.contains("http_request_duration_seconds"));
    }

    #[test]
    fn test_rejection_reasons_are_labelled() {
        let r = fresh_registry();
        record_rejection("rate_limited");
        record_rejection("validation");
        let out = gather_metrics(&r);
        assert!(out.contains("contact_rejections_total"));
        assert!(out.contains("rate_limited"));
        assert!(out.contains("validation"));
    }

    #[test]
    fn test_gather_returns_valid_prometheus_format() {
        let r = fresh_registry();
        SUBMISSIONS_TOTAL.inc();
        let out = gather_metrics(&r);
        assert!(out.contains("# HELP"));
        assert!(out.contains("# TYPE"));
        assert!(out.contains("contact_submissions_total"));
    }

    #[test]
    fn test_process_start_time_is_set() {
        mark_process_start();
        assert!(PROCESS_START_TIME.get() > 0);
    }

    #[test]
    fn test_all_families_registered() {
        let r = fresh_registry();
        SUBMISSIONS_TOTAL.inc();
        HONEYPOT_TRIPS.inc();
        EMAILS_SENT.inc();
        EMAIL_FAILURES.inc();
        DB_QUERY_ERRORS.inc();
        observe_http("GET", "/health", 200, 0.001);
        record_rejection("validation");
        let families = r.gather();
        assert!(
            families.len() >= 8,
            "expected ≥8 metric families, got {}",
            families.len()
        );
    }
}
