//! LLM integration crate for factcheck.
//!
//! This crate provides a provider-agnostic abstraction for interacting with
//! Large Language Models (LLMs), and the narrow [`AnswerGenerator`] seam the
//! verification engine depends on.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **OpenAI**: Any OpenAI-compatible chat completions endpoint
//! - **Mock**: Scripted replies for tests
//!
//! # Example
//! ```no_run
//! use factcheck_llm::{AnswerGenerator, LlmGenerator, providers::OllamaClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = LlmGenerator::new(Arc::new(OllamaClient::new()), "llama3.2");
//! let answer = generator.generate("How tall is the Eiffel Tower?").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod generator;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use generator::{AnswerGenerator, LlmGenerator};
pub use providers::{MockClient, OllamaClient, OpenAiClient};
pub use types::ProviderType;
