//! The answer generation seam.
//!
//! The verification engine only ever needs "prompt in, text out". This module
//! defines that contract and adapts any [`LlmClient`] to it.

use crate::client::{LlmClient, LlmRequest};
use factcheck_core::{AppError, AppResult};
use std::sync::Arc;

/// Produces raw answer text for a fully composed prompt.
///
/// Implementations must be safe to call concurrently. Failures are reported
/// as `AppError::Generation` and are never retried by callers.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate the complete answer for `prompt`.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// [`AnswerGenerator`] backed by an LLM provider.
pub struct LlmGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LlmGenerator {
    /// Create a generator that sends prompts to `model` through `client`.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Build the provider request for one prompt.
    fn request_for(&self, prompt: &str) -> LlmRequest {
        let mut request = LlmRequest::new(prompt, &self.model);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for LlmGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = self.request_for(prompt);

        let response = self.client.complete(&request).await.map_err(|e| {
            AppError::Generation(format!(
                "{} provider failed: {}",
                self.client.provider_name(),
                e
            ))
        })?;

        tracing::debug!(
            provider = self.client.provider_name(),
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Generated answer"
        );

        Ok(response.content)
    }
}
