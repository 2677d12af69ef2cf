//! # SMS Gateway
//!
//! Outbound text messages: registration credentials and OTPs.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      dyn SmsGateway                                     │
//! │                                                                         │
//! │   HttpSmsGateway ──► POST {gateway_url}                                │
//! │                      {"apikey", "shortcode", "mobile", "message"}      │
//! │                                                                         │
//! │   LogSmsGateway  ──► tracing::info! only (no URL / key configured)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::SmsConfig;

/// SMS delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("SMS gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SMS gateway rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("SMS gateway misconfigured: {0}")]
    Config(String),
}

pub type SmsResult<T> = Result<T, SmsError>;

/// Sends a text message to a mobile number.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, mobile: &str, message: &str) -> SmsResult<()>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

// =============================================================================
// HTTP Gateway
// =============================================================================

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    apikey: &'a str,
    shortcode: &'a str,
    mobile: &'a str,
    message: &'a str,
}

/// Gateway speaking the `{apikey, shortcode, mobile, message}` JSON API.
pub struct HttpSmsGateway {
    client: Client,
    url: String,
    api_key: String,
    sender_id: String,
}

impl HttpSmsGateway {
    pub fn new(config: &SmsConfig) -> SmsResult<Self> {
        let url = config
            .gateway_url
            .clone()
            .ok_or_else(|| SmsError::Config("gateway URL not set".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SmsError::Config("API key not set".to_string()))?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(HttpSmsGateway {
            client,
            url,
            api_key,
            sender_id: config.sender_id.clone(),
        })
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send(&self, mobile: &str, message: &str) -> SmsResult<()> {
        let request = SendSmsRequest {
            apikey: &self.api_key,
            shortcode: &self.sender_id,
            mobile,
            message,
        };

        debug!(mobile = %mobile, "Sending SMS");

        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();

        if status.is_success() {
            info!(mobile = %mobile, "SMS accepted by gateway");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(mobile = %mobile, status = %status, body = %body, "SMS gateway rejected message");
            Err(SmsError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

// =============================================================================
// Log Gateway
// =============================================================================

/// Logs messages instead of sending them. Used when no gateway is configured.
#[derive(Debug, Default)]
pub struct LogSmsGateway;

#[async_trait]
impl SmsGateway for LogSmsGateway {
    async fn send(&self, mobile: &str, message: &str) -> SmsResult<()> {
        info!(mobile = %mobile, message = %message, "SMS (not sent, no gateway configured)");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let request = SendSmsRequest {
            apikey: "key",
            shortcode: "FH-ONLINE",
            mobile: "254700000001",
            message: "hello",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "apikey": "key",
                "shortcode": "FH-ONLINE",
                "mobile": "254700000001",
                "message": "hello"
            })
        );
    }

    #[test]
    fn test_http_gateway_requires_url_and_key() {
        let config = SmsConfig {
            gateway_url: None,
            api_key: Some("key".to_string()),
            sender_id: "FH-ONLINE".to_string(),
            timeout_secs: 10,
        };
        assert!(matches!(
            HttpSmsGateway::new(&config),
            Err(SmsError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_log_gateway_always_succeeds() {
        assert!(LogSmsGateway.send("254700000001", "hi").await.is_ok());
    }
}
