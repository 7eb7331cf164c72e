//! Command handlers for the factcheck CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod check;
pub mod compare;
pub mod evaluate;
pub mod extract;
pub mod input;
pub mod prompts;

// Re-export command types for convenience
pub use check::CheckCommand;
pub use compare::CompareCommand;
pub use evaluate::EvaluateCommand;
pub use extract::ExtractCommand;
pub use prompts::PromptsCommand;

use factcheck_core::config::{AppConfig, ProviderConfig};
use factcheck_core::AppResult;
use factcheck_engine::{EngineOptions, FactChecker};
use factcheck_llm::{create_client, LlmGenerator};
use factcheck_prompt::PromptComposer;
use std::sync::Arc;
use std::time::Duration;

/// Build a fact checker for the configured provider, model and workspace.
pub fn build_checker(config: &AppConfig) -> AppResult<FactChecker> {
    let endpoint = config.resolve_endpoint(&config.provider);
    let api_key = config.resolve_api_key(&config.provider);
    let timeout = match config.get_provider_config(&config.provider) {
        Some(ProviderConfig::Ollama {
            timeout: Some(secs),
            ..
        }) => Some(Duration::from_secs(*secs)),
        _ => None,
    };

    let client = create_client(
        &config.provider,
        endpoint.as_deref(),
        api_key.as_deref(),
        timeout,
    )?;
    tracing::debug!("Using provider {} with model {}", client.provider_name(), config.model);

    let generator = LlmGenerator::new(client, &config.model)
        .with_temperature(config.engine.temperature)
        .with_max_tokens(config.engine.max_tokens);

    let composer = PromptComposer::load(&config.workspace)?;

    Ok(FactChecker::new(Arc::new(generator), composer)
        .with_options(EngineOptions::from(&config.engine)))
}
