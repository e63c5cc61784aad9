/// Transactional email dispatcher.
/// Sends rendered notifications through the Resend HTTP API; behind a trait
/// so the orchestrator can be exercised without a live provider.
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Provider returned error: HTTP {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("Network timeout")]
    Timeout,
}

/// A fully rendered outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Resend API client
pub struct ResendMailer {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    request_timeout: Duration,
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, RESEND_ENDPOINT.to_string())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        ResendMailer {
            endpoint,
            api_key,
            client,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        debug!("Dispatching notification email via {}", self.endpoint);

        let payload = ResendPayload {
            from: &email.from,
            to: [&email.to],
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailerError::Timeout
                } else {
                    MailerError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailerError::Provider {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
