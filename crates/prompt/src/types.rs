//! Prompt types for factcheck.
//!
//! This module defines the domain entities for the prompt system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Behavioral settings
    pub behavior: PromptBehavior,

    /// System message sent alongside the rendered template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Template string with Handlebars syntax
    pub template: String,

    /// Output specification
    pub output: PromptOutputSpec,
}

/// Behavioral settings for prompt execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptBehavior {
    /// Tone (e.g., "neutral", "technical")
    pub tone: String,

    /// Style (e.g., "concise", "terse")
    pub style: String,
}

/// Output specification for the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptOutputSpec {
    /// Output format (e.g., "text", "json")
    pub format: String,
}

/// What the composed prompt asks the model to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptMode {
    /// Answer the query from the context, refusing when unsupported
    Answer,
    /// Output only the value of one field
    ExtractField,
}

impl PromptMode {
    /// Id of the prompt definition that renders this mode.
    pub fn prompt_id(&self) -> &'static str {
        match self {
            Self::Answer => ANSWER_PROMPT_ID,
            Self::ExtractField => EXTRACT_FIELD_PROMPT_ID,
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answer => f.write_str("answer"),
            Self::ExtractField => f.write_str("extract-field"),
        }
    }
}

/// Prompt id used for [`PromptMode::Answer`].
pub const ANSWER_PROMPT_ID: &str = "factcheck.answer";

/// Prompt id used for [`PromptMode::ExtractField`].
pub const EXTRACT_FIELD_PROMPT_ID: &str = "factcheck.extract-field";

/// A fully built prompt ready for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message (optional)
    pub system: Option<String>,

    /// User message (required)
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Mode the prompt was composed for
    pub mode: PromptMode,

    /// Field targeted by an extract-field prompt
    #[serde(rename = "fieldName", skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    /// Whether a non-empty context block was injected
    #[serde(rename = "contextIncluded")]
    pub context_included: bool,
}

impl BuiltPrompt {
    /// Render the prompt as a single text, system message first.
    pub fn to_text(&self) -> String {
        match &self.system {
            Some(system) => format!("{}\n\n{}", system.trim_end(), self.user),
            None => self.user.clone(),
        }
    }
}
