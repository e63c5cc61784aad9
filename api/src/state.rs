use std::sync::Arc;
use std::time::Instant;

use prometheus::Registry;

use crate::config::AppConfig;
use crate::mailer::Mailer;
use crate::repository::ContactStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub config: Arc<AppConfig>,
    pub mailer: Arc<dyn Mailer>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContactStore>,
        config: AppConfig,
        mailer: Arc<dyn Mailer>,
        registry: Registry,
    ) -> Self {
        Self {
            store,
            config: Arc::new(config),
            mailer,
            started_at: Instant::now(),
            registry,
        }
    }
}
