//! Gateway configuration: endpoint, model, timeout, context window size.

use std::time::Duration;

use localchat_core::{LocalChatError, Result};

use crate::context::DEFAULT_MAX_PAIRS;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "gemma2:9b";
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

pub const ENV_LLM_URL: &str = "LOCALCHAT_LLM_URL";
pub const ENV_MODEL: &str = "LOCALCHAT_MODEL";
pub const ENV_TIMEOUT_MS: &str = "LOCALCHAT_TIMEOUT_MS";
pub const ENV_MAX_PAIRS: &str = "LOCALCHAT_MAX_PAIRS";

/// Settings passed into the gateway at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Full URL of the generate endpoint
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Upper bound for one request, including reading the body
    pub timeout: Duration,
    /// Number of user/assistant exchanges kept as prompt context
    pub max_pairs: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_pairs: DEFAULT_MAX_PAIRS,
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - `LOCALCHAT_LLM_URL` → endpoint
    /// - `LOCALCHAT_MODEL` → model
    /// - `LOCALCHAT_TIMEOUT_MS` → timeout (positive integer)
    /// - `LOCALCHAT_MAX_PAIRS` → max_pairs
    ///
    /// Missing, empty or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with a caller-supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(endpoint) = read(ENV_LLM_URL) {
            config.endpoint = endpoint;
        }

        if let Some(model) = read(ENV_MODEL) {
            config.model = model;
        }

        if let Some(timeout) = read(ENV_TIMEOUT_MS) {
            if let Ok(ms) = timeout.parse::<u64>() {
                if ms > 0 {
                    config.timeout = Duration::from_millis(ms);
                }
            }
        }

        if let Some(pairs) = read(ENV_MAX_PAIRS) {
            if let Ok(val) = pairs.parse::<usize>() {
                config.max_pairs = val;
            }
        }

        config
    }

    /// Reject values that would make every call fail before it is sent.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(LocalChatError::Config("endpoint must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(LocalChatError::Config("model must not be empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(LocalChatError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}
