//! Prompt system for factcheck.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions (built-in, overridable per workspace)
//! - Handlebars template rendering
//! - Answer and extract-field composition

pub mod composer;
pub mod loader;
pub mod types;

// Re-export main types
pub use composer::PromptComposer;
pub use loader::{builtin_prompt, list_prompts, load_prompt};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, PromptBehavior, PromptDefinition, PromptMode,
    PromptOutputSpec,
};
