//! Prompt composer: renders answer and extract-field prompts.

use crate::loader::{builtin_prompt, load_prompt};
use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition, PromptMode};
use factcheck_core::{AppError, AppResult, Field, FieldType};
use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;

/// Composes model prompts from a query, a context block and an optional field.
///
/// Templates are compiled once at construction; `compose` performs no I/O
/// and renders deterministically.
pub struct PromptComposer {
    registry: Handlebars<'static>,
    answer: PromptDefinition,
    extract_field: PromptDefinition,
}

impl PromptComposer {
    /// Create a composer from the built-in prompt definitions.
    pub fn builtin() -> AppResult<Self> {
        Self::from_definitions(
            builtin_prompt(PromptMode::Answer.prompt_id())?,
            builtin_prompt(PromptMode::ExtractField.prompt_id())?,
        )
    }

    /// Create a composer honouring prompt overrides in `.factcheck/prompts/`.
    pub fn load(workspace_path: &Path) -> AppResult<Self> {
        Self::from_definitions(
            load_prompt(workspace_path, PromptMode::Answer.prompt_id())?,
            load_prompt(workspace_path, PromptMode::ExtractField.prompt_id())?,
        )
    }

    /// Create a composer from explicit definitions.
    pub fn from_definitions(
        answer: PromptDefinition,
        extract_field: PromptDefinition,
    ) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Plain text prompts, no HTML escaping
        registry.register_escape_fn(handlebars::no_escape);

        for (mode, definition) in [
            (PromptMode::Answer, &answer),
            (PromptMode::ExtractField, &extract_field),
        ] {
            registry
                .register_template_string(mode.prompt_id(), &definition.template)
                .map_err(|e| {
                    AppError::Prompt(format!(
                        "Failed to register template {}: {}",
                        definition.id, e
                    ))
                })?;
        }

        Ok(Self {
            registry,
            answer,
            extract_field,
        })
    }

    /// Compose the prompt for `mode`.
    ///
    /// # Errors
    /// - `AppError::Validation` if `query` is blank, or if `mode` is
    ///   `ExtractField` and no field is given
    /// - `AppError::Prompt` if the template fails to render
    pub fn compose(
        &self,
        mode: PromptMode,
        query: &str,
        context_block: &str,
        field: Option<&Field>,
    ) -> AppResult<BuiltPrompt> {
        if query.trim().is_empty() {
            return Err(AppError::Validation("empty query".to_string()));
        }

        let has_context = !context_block.is_empty();

        let (definition, data, field_name) = match mode {
            PromptMode::Answer => (
                &self.answer,
                json!({
                    "query": query.trim(),
                    "context": context_block,
                    "hasContext": has_context,
                }),
                None,
            ),
            PromptMode::ExtractField => {
                let field = field.ok_or_else(|| {
                    AppError::Validation("extract-field prompt requires a field".to_string())
                })?;
                (
                    &self.extract_field,
                    json!({
                        "query": query.trim(),
                        "context": context_block,
                        "hasContext": has_context,
                        "fieldName": field.name,
                        "fieldDescription": field.description.trim(),
                        "fieldType": field.field_type.as_str(),
                        "typeInstruction": type_instruction(field.field_type),
                    }),
                    Some(field.name.clone()),
                )
            }
        };

        let user = self
            .registry
            .render(mode.prompt_id(), &data)
            .map_err(|e| {
                AppError::Prompt(format!("Failed to render {}: {}", definition.id, e))
            })?;

        tracing::trace!("Composed {} prompt ({} chars)", mode, user.len());

        Ok(BuiltPrompt {
            system: definition.system.clone(),
            user,
            metadata: BuiltPromptMetadata {
                source_prompt_id: definition.id.clone(),
                mode,
                field_name,
                context_included: has_context,
            },
        })
    }
}

/// Output-format instruction for a field type.
fn type_instruction(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "Reply with the text value only.",
        FieldType::Number => "Reply with a single number, for example 42 or 3.14.",
        FieldType::Integer => "Reply with a single whole number, for example 42.",
        FieldType::Boolean => "Reply with exactly yes or no.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptBehavior;
    use crate::types::PromptOutputSpec;
    use tempfile::TempDir;

    fn definition(id: &str, template: &str) -> PromptDefinition {
        PromptDefinition {
            id: id.to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            behavior: PromptBehavior {
                tone: "neutral".to_string(),
                style: "concise".to_string(),
            },
            system: None,
            template: template.to_string(),
            output: PromptOutputSpec {
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_answer_prompt_with_context() {
        let composer = PromptComposer::builtin().unwrap();
        let built = composer
            .compose(
                PromptMode::Answer,
                "How tall is the Eiffel Tower?",
                "The Eiffel Tower is 330 meters tall.",
                None,
            )
            .unwrap();

        assert!(built.user.contains("How tall is the Eiffel Tower?"));
        assert!(built.user.contains("The Eiffel Tower is 330 meters tall."));
        assert!(built.user.contains("only the context"));
        assert!(built.user.contains("I don't have enough information"));
        assert!(built.system.is_some());
        assert!(built.metadata.context_included);
        assert_eq!(built.metadata.source_prompt_id, "factcheck.answer");
    }

    #[test]
    fn test_answer_prompt_without_context() {
        let composer = PromptComposer::builtin().unwrap();
        let built = composer
            .compose(PromptMode::Answer, "Who built the Great Wall?", "", None)
            .unwrap();

        assert!(built.user.contains("No context was provided"));
        assert!(built.user.contains("I don't know"));
        assert!(!built.user.contains("Context:"));
        assert!(!built.metadata.context_included);
    }

    #[test]
    fn test_extract_prompt_mentions_field_and_type() {
        let composer = PromptComposer::builtin().unwrap();
        let field = Field::new("population", FieldType::Number)
            .with_description("Number of inhabitants");

        let built = composer
            .compose(
                PromptMode::ExtractField,
                "Describe Paris",
                "Paris has about 2.2 million inhabitants.",
                Some(&field),
            )
            .unwrap();

        assert!(built.user.contains("\"population\""));
        assert!(built.user.contains("Number of inhabitants"));
        assert!(built.user.contains("Expected type: number"));
        assert!(built.user.contains("single number"));
        assert!(built.user.contains("cannot be determined"));
        assert_eq!(built.metadata.field_name.as_deref(), Some("population"));
        assert_eq!(built.metadata.mode, PromptMode::ExtractField);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = PromptComposer::builtin().unwrap();
        let field = Field::new("active", FieldType::Boolean);

        let first = composer
            .compose(PromptMode::ExtractField, "q", "ctx", Some(&field))
            .unwrap();
        let second = composer
            .compose(PromptMode::ExtractField, "q", "ctx", Some(&field))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_query_rejected() {
        let composer = PromptComposer::builtin().unwrap();
        for query in ["", "   ", "\n\t"] {
            let err = composer
                .compose(PromptMode::Answer, query, "ctx", None)
                .unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains("empty query"));
        }
    }

    #[test]
    fn test_extract_without_field_rejected() {
        let composer = PromptComposer::builtin().unwrap();
        let err = composer
            .compose(PromptMode::ExtractField, "q", "ctx", None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_context_is_not_html_escaped() {
        let composer = PromptComposer::from_definitions(
            definition("factcheck.answer", "{{context}}"),
            definition("factcheck.extract-field", "{{fieldName}}"),
        )
        .unwrap();

        let built = composer
            .compose(PromptMode::Answer, "q", "a < b && \"c\"", None)
            .unwrap();
        assert_eq!(built.user, "a < b && \"c\"");
    }

    #[test]
    fn test_invalid_template_rejected() {
        let result = PromptComposer::from_definitions(
            definition("factcheck.answer", "{{#if}}"),
            definition("factcheck.extract-field", "{{fieldName}}"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_uses_workspace_override() {
        let temp_dir = TempDir::new().unwrap();
        let dir = crate::loader::prompts_dir(temp_dir.path());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("factcheck.answer.yml"),
            r#"
id: factcheck.answer
title: Terse
apiVersion: "1.0"
behavior:
  tone: neutral
  style: terse
template: "Q={{query}}"
output:
  format: text
"#,
        )
        .unwrap();

        let composer = PromptComposer::load(temp_dir.path()).unwrap();
        let built = composer
            .compose(PromptMode::Answer, "why?", "", None)
            .unwrap();
        assert_eq!(built.user, "Q=why?");
        assert!(built.system.is_none());
    }
}
