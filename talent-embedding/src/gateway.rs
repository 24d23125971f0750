//! The model gateway: the only way the engine reaches the language model

use async_trait::async_trait;

use crate::types::EmbeddingVector;

/// Options for a text completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Model override; the gateway's configured completion model otherwise
    pub model: Option<String>,
    pub max_tokens: u32,
    /// 0.0 - 1.0, higher is more creative
    pub temperature: f32,
    pub system_prompt: Option<String>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 1000,
            temperature: 0.7,
            system_prompt: None,
        }
    }
}

impl CompletionOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Temperature clamped into the supported range
    pub fn effective_temperature(&self) -> f32 {
        if self.temperature.is_nan() {
            return CompletionOptions::default().temperature;
        }
        self.temperature.clamp(0.0, 1.0)
    }
}

/// Embedding and completion capability of an external model
///
/// Both methods return `None` on any failure (model not configured, network
/// error, timeout, malformed response). Callers treat `None` as "skip this
/// component" and never as fatal. Implementations do not retry.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Embed free text into a fixed-length vector
    async fn embed(&self, text: &str) -> Option<EmbeddingVector>;

    /// Complete a prompt
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Option<String>;

    /// Whether calls can succeed at all
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Gateway used when no model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl ModelGateway for DisabledGateway {
    async fn embed(&self, _text: &str) -> Option<EmbeddingVector> {
        None
    }

    async fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> Option<String> {
        None
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_is_clamped() {
        let effective = |temperature: f32| {
            CompletionOptions::default()
                .with_temperature(temperature)
                .effective_temperature()
        };
        assert_eq!(effective(1.7), 1.0);
        assert_eq!(effective(-0.2), 0.0);
        assert_eq!(effective(f32::NAN), 0.7);
    }

    #[tokio::test]
    async fn test_disabled_gateway_returns_none() {
        let gateway = DisabledGateway;
        assert!(gateway.embed("anything").await.is_none());
        assert!(gateway.complete("anything", &CompletionOptions::default()).await.is_none());
        assert!(!gateway.is_enabled());
    }
}
