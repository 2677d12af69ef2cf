//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Default                  |
//! |-----------------------------|--------------------------|
//! | `FH_HTTP_PORT`              | `8000`                   |
//! | `FH_BIND_ADDR`              | `0.0.0.0`                |
//! | `FH_DATABASE_PATH`          | `./fh_online.db`         |
//! | `FH_BASE_URL`               | `http://localhost:8000`  |
//! | `FH_SMS_GATEWAY_URL`        | unset (log only)         |
//! | `FH_SMS_API_KEY`            | unset (log only)         |
//! | `FH_SMS_SENDER_ID`          | `FH-ONLINE`              |
//! | `FH_SMS_TIMEOUT_SECS`       | `10`                     |
//! | `FH_JOB_POLL_INTERVAL_SECS` | `5`                      |

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Listen address
    pub bind_addr: IpAddr,

    /// SQLite database file
    pub database_path: String,

    /// Public base URL, returned to clients on login
    pub base_url: String,

    /// SMS gateway settings
    pub sms: SmsConfig,

    /// Onboarding worker poll interval in seconds
    pub job_poll_interval_secs: u64,
}

/// SMS gateway settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Gateway endpoint; `None` logs messages instead of sending
    pub gateway_url: Option<String>,

    /// Gateway API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sender id / shortcode shown to recipients
    pub sender_id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("gateway_url", &self.gateway_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("sender_id", &self.sender_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SmsConfig {
    /// True when both the URL and the API key are set.
    pub fn is_configured(&self) -> bool {
        self.gateway_url.is_some() && self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = ApiConfig {
            http_port: parse_or(&lookup, "FH_HTTP_PORT", 8000)?,

            bind_addr: parse_or(&lookup, "FH_BIND_ADDR", IpAddr::from([0, 0, 0, 0]))?,

            database_path: non_empty("FH_DATABASE_PATH")
                .unwrap_or_else(|| "./fh_online.db".to_string()),

            base_url: non_empty("FH_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string())
                .trim_end_matches('/')
                .to_string(),

            sms: SmsConfig {
                gateway_url: non_empty("FH_SMS_GATEWAY_URL"),
                api_key: non_empty("FH_SMS_API_KEY"),
                sender_id: non_empty("FH_SMS_SENDER_ID")
                    .unwrap_or_else(|| "FH-ONLINE".to_string()),
                timeout_secs: parse_or(&lookup, "FH_SMS_TIMEOUT_SECS", 10)?,
            },

            job_poll_interval_secs: parse_or(&lookup, "FH_JOB_POLL_INTERVAL_SECS", 5)?,
        };

        if config.sms.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("FH_SMS_TIMEOUT_SECS".to_string()));
        }
        if config.job_poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "FH_JOB_POLL_INTERVAL_SECS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    pub fn job_poll_interval(&self) -> Duration {
        Duration::from_secs(self.job_poll_interval_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
