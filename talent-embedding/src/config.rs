//! Gateway configuration

use std::time::Duration;

use crate::error::{EmbeddingError, Result};

/// Default embedding model (1536 dimensions)
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default chat model: fast and cheap
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

/// Input cap in characters; bounds cost and latency of a single call
pub const DEFAULT_MAX_INPUT_CHARS: usize = 8000;

/// Configuration for the model gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// OpenAI API key; the gateway cannot be built without one
    pub api_key: Option<String>,
    pub embedding_model: String,
    pub completion_model: String,
    /// Text longer than this is truncated before embedding
    pub max_input_chars: usize,
    /// Per-request timeout; an expired request is reported as "no result"
    pub request_timeout: Duration,
    /// Maximum in-flight model requests across all callers
    pub max_concurrent_requests: usize,
    /// Minimum spacing between request starts
    pub min_request_interval: Duration,
    /// Discard embeddings whose length differs from this
    pub expected_dimension: Option<usize>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            request_timeout: Duration::from_secs(20),
            max_concurrent_requests: 8,
            min_request_interval: Duration::ZERO,
            expected_dimension: Some(1536),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from environment variables
    ///
    /// - `OPENAI_API_KEY`
    /// - `EMBEDDING_MODEL`, `COMPLETION_MODEL`
    /// - `MODEL_TIMEOUT_SECS`, `MODEL_MAX_CONCURRENCY`, `MODEL_MIN_INTERVAL_MS`
    /// - `EMBEDDING_DIMENSION` (`0` disables the dimension check)
    ///
    /// Unset variables keep their defaults; unparseable ones are an error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding_model = model;
        }
        if let Ok(model) = std::env::var("COMPLETION_MODEL") {
            config.completion_model = model;
        }
        if let Some(secs) = parse_env::<u64>("MODEL_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = parse_env::<usize>("MODEL_MAX_CONCURRENCY")? {
            config.max_concurrent_requests = n;
        }
        if let Some(ms) = parse_env::<u64>("MODEL_MIN_INTERVAL_MS")? {
            config.min_request_interval = Duration::from_millis(ms);
        }
        if let Some(dim) = parse_env::<usize>("EMBEDDING_DIMENSION")? {
            config.expected_dimension = (dim > 0).then_some(dim);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_concurrent_requests(mut self, n: usize) -> Self {
        self.max_concurrent_requests = n;
        self
    }

    /// Check that the limits are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_requests == 0 {
            return Err(EmbeddingError::Config(
                "max_concurrent_requests must be greater than zero".to_string(),
            ));
        }
        if self.max_input_chars == 0 {
            return Err(EmbeddingError::Config(
                "max_input_chars must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(EmbeddingError::Config(
                "request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                EmbeddingError::Config(format!("{} is not a valid number: {:?}", name, raw))
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_input_chars, 8000);
        assert_eq!(config.embedding_model, "text-embedding-3-small");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = GatewayConfig::default().with_max_concurrent_requests(0);
        assert!(matches!(config.validate(), Err(EmbeddingError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = GatewayConfig::default().with_request_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
