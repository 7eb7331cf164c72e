//! Scripted LLM client for tests and offline runs.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use factcheck_core::{AppError, AppResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What a rule answers with.
#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

/// Mock provider returning canned text.
///
/// Rules are checked in insertion order; the first rule whose needle occurs
/// in the prompt wins. Prompts matching no rule get the default reply.
/// Every call is counted and its prompt recorded.
#[derive(Debug)]
pub struct MockClient {
    rules: Vec<(String, Reply)>,
    default_reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockClient {
    /// Create a mock that answers every prompt with `default_reply`.
    pub fn new(default_reply: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default_reply: Reply::Text(default_reply.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        let mut mock = Self::new("");
        mock.default_reply = Reply::Fail(message.into());
        mock
    }

    /// Answer prompts containing `needle` with `reply`.
    pub fn with_reply(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Text(reply.into())));
        self
    }

    /// Fail prompts containing `needle` with an LLM error.
    pub fn with_failure(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Fail(message.into())));
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn reply_for(&self, prompt: &str) -> &Reply {
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.default_reply)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        match self.reply_for(&request.prompt) {
            Reply::Text(text) => Ok(LlmResponse {
                content: text.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(
                    request.prompt.split_whitespace().count() as u32,
                    text.split_whitespace().count() as u32,
                ),
            }),
            Reply::Fail(message) => Err(AppError::Llm(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_reply() {
        let mock = MockClient::new("330 meters");
        let response = mock
            .complete(&LlmRequest::new("How tall?", "mock"))
            .await
            .unwrap();

        assert_eq!(response.content, "330 meters");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.prompts(), vec!["How tall?".to_string()]);
    }

    #[tokio::test]
    async fn test_first_matching_rule_wins() {
        let mock = MockClient::new("default")
            .with_reply("population", "2.2 million")
            .with_reply("pop", "never reached");

        let response = mock
            .complete(&LlmRequest::new("Field: population", "mock"))
            .await
            .unwrap();
        assert_eq!(response.content, "2.2 million");
    }

    #[tokio::test]
    async fn test_failures() {
        let mock = MockClient::new("ok").with_failure("boom", "model crashed");
        let err = mock
            .complete(&LlmRequest::new("boom", "mock"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("model crashed"));

        let always = MockClient::failing("offline");
        assert!(always.complete(&LlmRequest::new("x", "mock")).await.is_err());
        assert_eq!(always.call_count(), 1);
    }
}
