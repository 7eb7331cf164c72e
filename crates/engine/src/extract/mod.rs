//! Schema-driven extraction.
//!
//! Every field gets its own extract-field prompt and its own generation call.
//! Fields never influence each other: a failing field is recorded and the
//! remaining fields still run.

pub mod coerce;

use crate::assemble::assemble_extraction;
use crate::phrases::contains_refusal;
use crate::types::{ExtractionResult, FieldValue};
use factcheck_core::{AppError, AppResult, Field};
use factcheck_llm::AnswerGenerator;
use factcheck_prompt::{PromptComposer, PromptMode};
use futures::stream::{self, StreamExt};
use thiserror::Error;

pub use coerce::{coerce, strategy_for, CoercionError};

/// Why one field produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Result of extracting one field.
pub type FieldOutcome = Result<FieldValue, FieldError>;

/// Interpret a field's raw answer.
///
/// Blank answers and refusals mean the value is absent; anything else goes
/// through the field type's coercer.
pub fn interpret(field: &Field, raw: &str) -> FieldOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() || contains_refusal(trimmed) {
        return Err(FieldError::NotFound);
    }

    Ok(coerce(field.field_type, trimmed)?)
}

/// Extract every field from `context_block`.
///
/// All prompts are composed before the first model call, so a composition
/// failure leaves the generator untouched. At most `concurrency` generation
/// calls are in flight at once.
pub async fn extract_fields(
    generator: &dyn AnswerGenerator,
    composer: &PromptComposer,
    query: &str,
    context_block: &str,
    fields: &[Field],
    concurrency: usize,
) -> AppResult<ExtractionResult> {
    let prompts = fields
        .iter()
        .map(|field| {
            composer
                .compose(PromptMode::ExtractField, query, context_block, Some(field))
                .map(|built| (field, built.to_text()))
        })
        .collect::<AppResult<Vec<_>>>()?;

    tracing::debug!(
        fields = fields.len(),
        concurrency,
        "Extracting fields"
    );

    let outcomes: Vec<(String, FieldOutcome)> = stream::iter(prompts)
        .map(|(field, prompt)| async move {
            let outcome = match generator.generate(&prompt).await {
                Ok(raw) => interpret(field, &raw),
                Err(e) => Err(FieldError::Generation(generation_message(e))),
            };

            if let Err(e) = &outcome {
                tracing::warn!(field = %field.name, "Field extraction failed: {}", e);
            }
            (field.name.clone(), outcome)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    Ok(assemble_extraction(outcomes))
}

/// Strip the outer category prefix from generator errors.
fn generation_message(err: AppError) -> String {
    match err {
        AppError::Generation(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_core::FieldType;

    #[test]
    fn test_interpret_blank_is_not_found() {
        let field = Field::new("city", FieldType::String);
        assert_eq!(interpret(&field, "  \n"), Err(FieldError::NotFound));
    }

    #[test]
    fn test_interpret_refusal_is_not_found() {
        let field = Field::new("city", FieldType::String);
        assert_eq!(
            interpret(&field, "The city cannot be determined."),
            Err(FieldError::NotFound)
        );
    }

    #[test]
    fn test_interpret_coerces() {
        let field = Field::new("population", FieldType::Number);
        assert_eq!(
            interpret(&field, "approximately 2.2 million"),
            Ok(FieldValue::Number(2.2))
        );

        let err = interpret(&field, "quite large").unwrap_err();
        assert!(matches!(err, FieldError::Coercion(CoercionError::NoNumber(_))));
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::NotFound.to_string(), "not found");
        assert_eq!(
            FieldError::Generation("mock provider failed: LLM error: offline".into()).to_string(),
            "generation failed: mock provider failed: LLM error: offline"
        );
        assert_eq!(
            FieldError::from(CoercionError::NotInteger("2.5".into())).to_string(),
            "'2.5' is not a whole number"
        );
    }

    #[test]
    fn test_generation_message_strips_prefix() {
        assert_eq!(
            generation_message(AppError::Generation("timeout".into())),
            "timeout"
        );
        assert_eq!(
            generation_message(AppError::Llm("timeout".into())),
            "LLM error: timeout"
        );
    }
}
