//! Fact checking facade.
//!
//! [`FactChecker`] wires the stateless stages together:
//! 1. Validates the request
//! 2. Normalizes context and documents into one block
//! 3. Composes the prompt(s)
//! 4. Generates raw answers
//! 5. Scores the answer or coerces field values
//! 6. Assembles the result

use crate::assemble::assemble_fact_check;
use crate::extract::extract_fields;
use crate::normalize::normalize;
use crate::scoring::score;
use crate::types::{ExtractionRequest, ExtractionResult, FactCheckRequest, FactCheckResult};
use crate::validation::{validate_fields, validate_query};
use factcheck_core::{AppError, AppResult, EngineConfig};
use factcheck_llm::AnswerGenerator;
use factcheck_prompt::{PromptComposer, PromptMode};
use std::sync::Arc;
use tracing::Instrument;

/// Queries are logged truncated to this many characters.
const LOG_QUERY_CHARS: usize = 50;

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum number of field prompts in flight during one extraction
    pub extraction_concurrency: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for EngineOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            extraction_concurrency: config.extraction_concurrency.max(1),
        }
    }
}

/// Verifies claims and extracts typed fields against caller context.
///
/// Holds only read-only collaborators, so one instance can serve concurrent
/// requests behind an `Arc`.
pub struct FactChecker {
    generator: Arc<dyn AnswerGenerator>,
    composer: PromptComposer,
    options: EngineOptions,
}

impl FactChecker {
    pub fn new(generator: Arc<dyn AnswerGenerator>, composer: PromptComposer) -> Self {
        Self {
            generator,
            composer,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Answer `request.query` from its context and score the answer.
    ///
    /// # Errors
    /// - `AppError::Validation` for a blank query, before any model call
    /// - `AppError::Generation` when the generator fails
    pub async fn fact_check(&self, request: &FactCheckRequest) -> AppResult<FactCheckResult> {
        let span = tracing::info_span!("fact_check", request_id = %uuid::Uuid::new_v4());
        self.run_fact_check(request).instrument(span).await
    }

    async fn run_fact_check(&self, request: &FactCheckRequest) -> AppResult<FactCheckResult> {
        validate_query(&request.query)?;
        tracing::info!("Fact checking query: {}", log_query(&request.query));

        let context = normalize(request.context.as_deref(), request.documents.as_deref());
        let has_context = context.has_context();

        let built = self.composer.compose(
            PromptMode::Answer,
            &request.query,
            &context.context_block,
            None,
        )?;

        let answer = self.generator.generate(&built.to_text()).await?;
        let score = score(&answer, has_context);

        tracing::info!(
            has_context,
            sources = context.sources.len(),
            confidence = score.confidence,
            factual = score.factual,
            "Fact check complete"
        );

        Ok(assemble_fact_check(answer, score, context))
    }

    /// Extract every requested field from the request's context.
    ///
    /// Per-field failures are recorded in the result, never returned.
    ///
    /// # Errors
    /// - `AppError::Validation` for a blank query, an empty field list,
    ///   blank or duplicate field names, or missing context, before any
    ///   model call
    pub async fn extract(&self, request: &ExtractionRequest) -> AppResult<ExtractionResult> {
        let span = tracing::info_span!("extract", request_id = %uuid::Uuid::new_v4());
        self.run_extract(request).instrument(span).await
    }

    async fn run_extract(&self, request: &ExtractionRequest) -> AppResult<ExtractionResult> {
        validate_query(&request.query)?;
        validate_fields(&request.fields)?;
        tracing::info!(
            "Extracting {} field(s) for query: {}",
            request.fields.len(),
            log_query(&request.query)
        );

        let context = normalize(request.context.as_deref(), request.documents.as_deref());
        if !context.has_context() {
            return Err(AppError::Validation(
                "context is required for extraction".to_string(),
            ));
        }

        let result = extract_fields(
            self.generator.as_ref(),
            &self.composer,
            &request.query,
            &context.context_block,
            &request.fields,
            self.options.extraction_concurrency,
        )
        .await?;

        tracing::info!(
            success = result.success,
            failed = result.errors.len(),
            "Extraction complete"
        );

        Ok(result)
    }
}

/// Query truncated for logging.
fn log_query(query: &str) -> String {
    let trimmed = query.trim();
    if trimmed.chars().count() <= LOG_QUERY_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(LOG_QUERY_CHARS).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_query_truncates() {
        assert_eq!(log_query("  short  "), "short");

        let long = "x".repeat(80);
        let logged = log_query(&long);
        assert_eq!(logged.len(), LOG_QUERY_CHARS + 3);
        assert!(logged.ends_with("..."));
    }

    #[test]
    fn test_options_from_config() {
        let config = EngineConfig {
            extraction_concurrency: 8,
            ..Default::default()
        };
        assert_eq!(EngineOptions::from(&config).extraction_concurrency, 8);

        let zero = EngineConfig {
            extraction_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(EngineOptions::from(&zero).extraction_concurrency, 1);
    }

    #[test]
    fn test_default_options() {
        assert_eq!(EngineOptions::default().extraction_concurrency, 4);
    }
}
