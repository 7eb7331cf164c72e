//! End-to-end engine tests against scripted generators.


use crate::checker::{EngineOptions, FactChecker};
use factcheck_core::{AppResult, Field, FieldType};
use factcheck_llm::{AnswerGenerator, LlmGenerator, MockClient};
use factcheck_prompt::PromptComposer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Checker whose model is the given mock.
fn checker_with(mock: &Arc<MockClient>) -> FactChecker {
    let generator = LlmGenerator::new(mock.clone(), "test-model");
    FactChecker::new(Arc::new(generator), PromptComposer::builtin().unwrap())
}

/// Needle matching only the extract-field prompt of `name`.
fn field_needle(name: &str) -> String {
    format!("\"{}\"", name)
}

fn number_field(name: &str) -> Field {
    Field::new(name, FieldType::Number)
}

/// Generator that answers every prompt after a delay and records how many
/// calls were in flight at once.
struct MockGenerator {
    reply: String,
    slow_needle: Option<String>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockGenerator {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            slow_needle: None,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Prompts containing `needle` take much longer than the rest.
    fn slow_on(mut self, needle: &str) -> Self {
        self.slow_needle = Some(needle.to_string());
        self
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let slow = self
            .slow_needle
            .as_ref()
            .is_some_and(|needle| prompt.contains(needle.as_str()));
        let delay = if slow { 60 } else { 5 };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Checker backed by a [`MockGenerator`].
fn checker_with_generator(generator: &Arc<MockGenerator>, concurrency: usize) -> FactChecker {
    FactChecker::new(generator.clone(), PromptComposer::builtin().unwrap()).with_options(
        EngineOptions {
            extraction_concurrency: concurrency,
        },
    )
}
