//! Fact verification and structured extraction engine.
//!
//! Given a query plus optional free-form context and documents, the engine
//! asks a model for an answer grounded in that context, scores the answer
//! from lexical cues, and optionally extracts a caller-defined set of typed
//! fields from the same context. The `evaluate` module measures a model
//! against a labelled dataset.
//!
//! # Example
//! ```no_run
//! use factcheck_engine::{FactChecker, FactCheckRequest};
//! use factcheck_llm::{LlmGenerator, OllamaClient};
//! use factcheck_prompt::PromptComposer;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = LlmGenerator::new(Arc::new(OllamaClient::new()), "llama3.2");
//! let checker = FactChecker::new(Arc::new(generator), PromptComposer::builtin()?);
//!
//! let request = FactCheckRequest::new("How tall is the Eiffel Tower?")
//!     .with_context("The Eiffel Tower is 330 meters tall.");
//! let result = checker.fact_check(&request).await?;
//! println!("{} ({:.1})", result.answer, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod checker;
pub mod evaluate;
pub mod extract;
pub mod normalize;
pub mod phrases;
pub mod scoring;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export main types
pub use checker::{EngineOptions, FactChecker};
pub use evaluate::{
    compare, evaluate, ComparisonReport, EvaluationRecord, EvaluationReport, KeyPointResult,
    RecordResult, CORRECT_CONFIDENCE,
};
pub use extract::{CoercionError, FieldError};
pub use normalize::{normalize, NormalizedContext, CONTEXT_SEPARATOR};
pub use scoring::{score, ConfidenceScore, FACTUAL_THRESHOLD};
pub use types::{
    Document, ExtractionRequest, ExtractionResult, FactCheckRequest, FactCheckResult, FieldValue,
    DEFAULT_SNIPPET_LENGTH,
};
