use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Runtime configuration for the advisor client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub request_timeout: Duration,
    pub data_dir: PathBuf,
    pub history_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: default_data_dir(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base = std::env::var("ADVISOR_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let request_timeout = match std::env::var("ADVISOR_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(parse_number("ADVISOR_REQUEST_TIMEOUT_SECS", &raw)?),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let history_limit = match std::env::var("ADVISOR_HISTORY_LIMIT") {
            Ok(raw) => parse_number("ADVISOR_HISTORY_LIMIT", &raw)?,
            Err(_) => DEFAULT_HISTORY_LIMIT,
        };

        let data_dir = std::env::var("ADVISOR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let config = Self {
            api_base,
            request_timeout,
            data_dir,
            history_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", self.api_base, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{}: scheme must be http or https",
                self.api_base
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "ADVISOR_REQUEST_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve an endpoint path relative to the API base.
    ///
    /// `endpoint("chat")` on `http://host/api/v1` yields `http://host/api/v1/chat`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        let base = if self.api_base.ends_with('/') {
            self.api_base.clone()
        } else {
            format!("{}/", self.api_base)
        };

        Url::parse(&base)
            .and_then(|b| b.join(path.trim_start_matches('/')))
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", self.api_base, e)))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("economic-advisor"))
        .unwrap_or_else(|| PathBuf::from(".economic-advisor"))
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
