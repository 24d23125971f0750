//! OpenAI-backed model gateway

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    types::embeddings::{CreateEmbeddingRequest, EmbeddingInput},
    Client,
};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::GatewayConfig,
    error::{EmbeddingError, Result},
    gateway::{CompletionOptions, ModelGateway},
    limiter::{LimiterStats, RequestLimiter},
    text::truncate_chars,
    types::EmbeddingVector,
};

/// Model gateway over the OpenAI embeddings and chat APIs
///
/// Every request goes through a shared [`RequestLimiter`] and a timeout.
/// text-embedding-3-small cost: $0.00002 per 1K tokens.
pub struct OpenAIGateway {
    client: Client<OpenAIConfig>,
    config: GatewayConfig,
    limiter: RequestLimiter,
}

impl OpenAIGateway {
    /// Create a gateway; fails without an API key or with unusable limits
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| EmbeddingError::Config("OpenAI API key not configured".to_string()))?;

        let limiter = RequestLimiter::new(
            config.max_concurrent_requests,
            config.min_request_interval,
            "OpenAI",
        );

        info!(
            "Model gateway ready: embedding_model={}, completion_model={}, timeout={:?}, \
             max_in_flight={}",
            config.embedding_model,
            config.completion_model,
            config.request_timeout,
            config.max_concurrent_requests
        );

        Ok(Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
            config,
            limiter,
        })
    }

    /// Create a gateway from `OPENAI_API_KEY` and friends
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn limiter_stats(&self) -> LimiterStats {
        self.limiter.stats()
    }

    /// Run a model request under the limiter and the configured timeout
    async fn limited<T, F>(&self, request: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, async_openai::error::OpenAIError>>,
    {
        let _permit = self.limiter.acquire().await?;
        tokio::time::timeout(self.config.request_timeout, request)
            .await
            .map_err(|_| EmbeddingError::Timeout(self.config.request_timeout))?
            .map_err(EmbeddingError::from)
    }

    /// Low-level embedding generation
    async fn try_embed(&self, text: &str) -> Result<EmbeddingVector> {
        let text = truncate_chars(text, self.config.max_input_chars);
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let request = CreateEmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: EmbeddingInput::String(text.to_string()),
            encoding_format: None,
            dimensions: None,
            user: None,
        };

        debug!("Embedding text with length: {} chars", text.len());
        let response = self
            .limited(self.client.embeddings().create(request))
            .await?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(EmbeddingError::EmptyResponse)?;

        if let Some(expected) = self.config.expected_dimension {
            if embedding.len() != expected {
                return Err(EmbeddingError::InvalidDimension {
                    expected,
                    actual: embedding.len(),
                });
            }
        }

        debug!(
            "Generated embedding: dimension={}, model={}",
            embedding.len(),
            self.config.embedding_model
        );

        Ok(embedding)
    }

    /// Low-level chat completion
    async fn try_complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(system_prompt) = &options.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt.as_str())
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );

        let model = options
            .model
            .as_deref()
            .unwrap_or(&self.config.completion_model);

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(options.effective_temperature())
            .max_tokens(options.max_tokens)
            .build()?;

        let response = self.limited(self.client.chat().create(request)).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(EmbeddingError::EmptyResponse)?;

        debug!("Completion from {}: {} chars", model, content.len());
        Ok(content)
    }
}

#[async_trait]
impl ModelGateway for OpenAIGateway {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn embed(&self, text: &str) -> Option<EmbeddingVector> {
        match self.try_embed(text).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                warn!("Embedding unavailable: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self, prompt, options), fields(prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Option<String> {
        match self.try_complete(prompt, options).await {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Completion unavailable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let result = OpenAIGateway::new(GatewayConfig::default());
        assert!(matches!(result, Err(EmbeddingError::Config(_))));

        let result = OpenAIGateway::new(GatewayConfig::default().with_api_key("  "));
        assert!(matches!(result, Err(EmbeddingError::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_the_api() {
        let gateway = OpenAIGateway::new(GatewayConfig::default().with_api_key("sk-test"))
            .expect("gateway");
        assert!(gateway.embed("   ").await.is_none());
        assert!(gateway.complete("", &CompletionOptions::default()).await.is_none());
        assert_eq!(gateway.limiter_stats().total_requests, 0);
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn test_embed_text() {
        let gateway = OpenAIGateway::from_env().expect("OPENAI_API_KEY not set");

        let embedding = gateway
            .embed("Senior React developer with five years of e-commerce experience")
            .await
            .expect("Failed to generate embedding");

        assert_eq!(embedding.len(), 1536);
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn test_complete() {
        let gateway = OpenAIGateway::from_env().expect("OPENAI_API_KEY not set");

        let text = gateway
            .complete(
                "Say hello in one word.",
                &CompletionOptions::default().with_max_tokens(5),
            )
            .await;

        assert!(text.is_some());
    }
}
