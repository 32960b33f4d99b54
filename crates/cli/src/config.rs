//! Startup configuration, read once from the process environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `OPENAI_API_KEY` | required |
//! | `STUDY_GATEWAY_BIND` | `0.0.0.0:5000` |
//! | `STUDY_GATEWAY_UPSTREAM_URL` | [`llm::DEFAULT_BASE_URL`] |
//! | `STUDY_GATEWAY_MODEL` | [`llm::DEFAULT_MODEL`] |
//! | `STUDY_GATEWAY_UPSTREAM_TIMEOUT_SECS` | unset (no timeout) |
//! | `STUDY_GATEWAY_LOG_FORMAT` | `text` |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset (no span export) |

use std::net::SocketAddr;
use std::time::Duration;

use llm::{ApiKey, OpenRouterConfig, DEFAULT_MODEL};
use thiserror::Error;
use tutor::ModelId;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BIND_VAR: &str = "STUDY_GATEWAY_BIND";
pub const UPSTREAM_URL_VAR: &str = "STUDY_GATEWAY_UPSTREAM_URL";
pub const MODEL_VAR: &str = "STUDY_GATEWAY_MODEL";
pub const TIMEOUT_VAR: &str = "STUDY_GATEWAY_UPSTREAM_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "STUDY_GATEWAY_LOG_FORMAT";
pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Output format of the fmt log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// The environment does not describe a runnable gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{name} must be set to a non-empty value")]
    Missing {
        /// Name of the environment variable.
        name: &'static str,
    },

    /// A variable is set but cannot be used.
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Name of the environment variable.
        name: &'static str,
        /// The offending value. Never produced for the API key.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Upstream connection settings, including the API key.
    pub upstream: OpenRouterConfig,
    pub log_format: LogFormat,
    /// gRPC endpoint for span export; `None` disables export.
    pub otlp_endpoint: Option<String>,
}

impl GatewayConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; unset and blank values are treated alike.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR)
            .and_then(ApiKey::new)
            .ok_or(ConfigError::Missing { name: API_KEY_VAR })?;

        let bind_raw = get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid(BIND_VAR, &bind_raw, e))?;

        let model_raw = get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let model = ModelId::new(model_raw.trim()).ok_or(ConfigError::Missing { name: MODEL_VAR })?;

        let mut upstream = OpenRouterConfig::new(api_key, model);
        if let Some(url) = get(UPSTREAM_URL_VAR) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(UPSTREAM_URL_VAR, url, "expected an http(s) URL"));
            }
            upstream.base_url = url.to_string();
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid(TIMEOUT_VAR, &raw, e))?;
            if secs == 0 {
                return Err(invalid(TIMEOUT_VAR, &raw, "must be greater than zero"));
            }
            upstream.timeout = Some(Duration::from_secs(secs));
        }

        let log_format = match get(LOG_FORMAT_VAR).map(|v| v.trim().to_ascii_lowercase()) {
            None => LogFormat::default(),
            Some(v) if v == "text" => LogFormat::Text,
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) => return Err(invalid(LOG_FORMAT_VAR, &v, "expected `text` or `json`")),
        };

        Ok(Self {
            bind,
            upstream,
            log_format,
            otlp_endpoint: get(OTLP_ENDPOINT_VAR).map(|v| v.trim().to_string()),
        })
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
