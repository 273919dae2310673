//! Process configuration, read once at startup and passed down explicitly.

use std::{fmt, net::SocketAddr, time::Duration};

use crate::{
    error::{PlannerError, Result},
    services::gemini_client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL},
};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// How long the client waits for the API. Must exceed the upstream timeout so
/// the server's own answer arrives first.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS + 30;

pub const ENV_BIND: &str = "BIND_ADDRESS";
pub const ENV_PORT: &str = "PORT";
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_TIMEOUT: &str = "UPSTREAM_TIMEOUT_SECS";
pub const ENV_STRICT_SHAPE: &str = "STRICT_SHAPE";
pub const ENV_API_URL: &str = "ITINERARY_API_URL";

/// Settings for the itinerary service
#[derive(Clone)]
pub struct ServiceConfig {
    pub bind: String,
    pub port: u16,
    api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub strict_shape: bool,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("strict_shape", &self.strict_shape)
            .finish()
    }
}

impl ServiceConfig {
    /// Build from any key lookup. The API key is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        let timeout = match get(ENV_TIMEOUT) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let strict_shape = match get(ENV_STRICT_SHAPE) {
            Some(raw) => parse_flag(ENV_STRICT_SHAPE, &raw)?,
            None => false,
        };

        let config = Self {
            bind: get(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port,
            api_key: get(ENV_API_KEY).unwrap_or_default(),
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            strict_shape,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration pointing at an explicit key and provider URL
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            strict_shape: false,
        }
    }

    /// Reject settings that would only fail later, at request time
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(PlannerError::Config(format!(
                "{} must be set (or pass --api-key)",
                ENV_API_KEY
            )));
        }
        if self.timeout.is_zero() {
            return Err(PlannerError::Config(
                "upstream timeout must be greater than zero".to_string(),
            ));
        }
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|err| {
                PlannerError::Config(format!(
                    "invalid bind address {}:{}: {}",
                    self.bind, self.port, err
                ))
            })
    }

    /// Model client for these settings
    pub fn gemini_client(&self) -> Result<GeminiClient> {
        Ok(GeminiClient::new(self.api_key.clone(), self.timeout)?
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone()))
    }
}

pub fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| PlannerError::Config(format!("invalid port: {}", raw)))
}

pub fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| PlannerError::Config(format!("invalid timeout seconds: {}", raw)))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PlannerError::Config(format!(
            "{} must be true or false, got {}",
            key, raw
        ))),
    }
}
