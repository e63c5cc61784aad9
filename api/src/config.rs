/// Service configuration module
/// Everything is environment-provided: the datastore connection string,
/// the email-provider credential, addresses, and the anti-spam knobs.
use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let connection_string =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingEnv("DATABASE_URL".to_string()))?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid max_connections: {}", e)))?;

        debug!("Database configuration loaded: max_connections={}", max_connections);

        Ok(DatabaseConfig {
            connection_string,
            max_connections,
        })
    }
}

/// Transactional email configuration (Resend)
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub resend_api_key: String,
    pub sender: String,
    pub recipient: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let resend_api_key = env::var("RESEND_API_KEY")
            .map_err(|_| ConfigError::MissingEnv("RESEND_API_KEY".to_string()))?;

        let sender =
            env::var("SENDER_EMAIL").unwrap_or_else(|_| "noreply@fluxelectrique.com".to_string());
        let recipient =
            env::var("CONTACT_EMAIL").unwrap_or_else(|_| "contact@fluxelectrique.com".to_string());

        debug!("Mail configuration loaded: sender={}, recipient={}", sender, recipient);

        Ok(MailConfig {
            resend_api_key,
            sender,
            recipient,
        })
    }
}

/// Anti-spam configuration: honeypot delay and per-IP submission cap.
#[derive(Debug, Clone)]
pub struct SpamConfig {
    pub rate_limit_max_per_window: u32,
    pub rate_limit_window: Duration,
    pub honeypot_delay: Duration,
}

impl SpamConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let rate_limit_max_per_window = env::var("RATE_LIMIT_MAX_PER_HOUR")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid rate limit max: {}", e)))?;

        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid rate limit window: {}", e)))?;

        if window_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Rate limit window must be at least 1 second".to_string(),
            ));
        }

        let honeypot_delay_ms = env::var("HONEYPOT_DELAY_MS")
            .unwrap_or_else(|_| "1500".to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid honeypot delay: {}", e)))?;

        Ok(SpamConfig {
            rate_limit_max_per_window,
            rate_limit_window: Duration::from_secs(window_secs),
            honeypot_delay: Duration::from_millis(honeypot_delay_ms),
        })
    }
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub spam: SpamConfig,
    pub port: u16,
    pub site_origin: String,
}

impl AppConfig {
    /// Load full service configuration
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = DatabaseConfig::from_env()?;
        let mail = MailConfig::from_env()?;
        let spam = SpamConfig::from_env()?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid port: {}", e)))?;

        let site_origin =
            env::var("SITE_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        info!(
            "Service configuration loaded: port={}, rate_limit={}/{}s, honeypot_delay={}ms",
            port,
            spam.rate_limit_max_per_window,
            spam.rate_limit_window.as_secs(),
            spam.honeypot_delay.as_millis()
        );

        Ok(AppConfig {
            database,
            mail,
            spam,
            port,
            site_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spam_config_defaults() {
        env::remove_var("RATE_LIMIT_MAX_PER_HOUR");
        env::remove_var("RATE_LIMIT_WINDOW_SECS");
        env::remove_var("HONEYPOT_DELAY_MS");

        let config = SpamConfig::from_env().expect("should load with defaults");
        assert_eq!(config.rate_limit_max_per_window, 3);
        assert_eq!(config.rate_limit_window, Duration::from_secs(3600));
        assert_eq!(config.honeypot_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_mail_config_requires_api_key() {
        env::remove_var("RESEND_API_KEY");
        assert!(matches!(
            MailConfig::from_env(),
            Err(ConfigError::MissingEnv(_))
        ));
    }
}
