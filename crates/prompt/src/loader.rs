//! Prompt loader for built-in and workspace YAML prompt definitions.

use crate::types::{PromptDefinition, ANSWER_PROMPT_ID, EXTRACT_FIELD_PROMPT_ID};
use factcheck_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Prompt definitions compiled into the binary, keyed by id.
const BUILTIN_PROMPTS: &[(&str, &str)] = &[
    (
        ANSWER_PROMPT_ID,
        include_str!("../prompts/factcheck.answer.yml"),
    ),
    (
        EXTRACT_FIELD_PROMPT_ID,
        include_str!("../prompts/factcheck.extract-field.yml"),
    ),
];

/// Directory holding workspace prompt overrides.
pub fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".factcheck/prompts")
}

/// Load a prompt definition by ID.
///
/// A file named `<id>.yml` in `.factcheck/prompts/` takes precedence over
/// the built-in definition of the same id.
///
/// # Example
/// ```no_run
/// use factcheck_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "factcheck.answer")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    if prompt_file.exists() {
        tracing::debug!("Loading prompt from: {:?}", prompt_file);

        let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
            AppError::Prompt(format!(
                "Failed to read prompt file {:?}: {}",
                prompt_file, e
            ))
        })?;

        let definition = parse_prompt(&contents)
            .map_err(|e| AppError::Prompt(format!("{:?}: {}", prompt_file, e)))?;

        if definition.id != prompt_id {
            return Err(AppError::Prompt(format!(
                "Prompt file {:?} declares id '{}'",
                prompt_file, definition.id
            )));
        }

        tracing::info!("Loaded workspace prompt: {} ({})", definition.id, definition.title);
        return Ok(definition);
    }

    builtin_prompt(prompt_id)
}

/// Load a built-in prompt definition.
pub fn builtin_prompt(prompt_id: &str) -> AppResult<PromptDefinition> {
    let (_, source) = BUILTIN_PROMPTS
        .iter()
        .find(|(id, _)| *id == prompt_id)
        .ok_or_else(|| AppError::Prompt(format!("Prompt not found: {}", prompt_id)))?;

    parse_prompt(source)
}

/// List all available prompt IDs: built-ins followed by workspace-only ids.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let mut prompt_ids: Vec<String> = BUILTIN_PROMPTS
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();

    let dir = prompts_dir(workspace_path);
    if !dir.exists() {
        return Ok(prompt_ids);
    }

    let mut workspace_ids = Vec::new();
    for entry in walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !prompt_ids.iter().any(|id| id == stem) {
                    workspace_ids.push(stem.to_string());
                }
            }
        }
    }

    workspace_ids.sort();
    prompt_ids.extend(workspace_ids);
    Ok(prompt_ids)
}

/// Parse and validate a YAML prompt definition.
fn parse_prompt(contents: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML: {}", e)))?;

    validate_prompt(&definition)?;
    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_prompt(dir: &Path, id: &str, template: &str) {
        let dir = prompts_dir(dir);
        fs::create_dir_all(&dir).unwrap();

        let content = format!(
            r#"
id: {}
title: "Workspace Prompt"
apiVersion: "1.0"
behavior:
  tone: neutral
  style: concise
template: "{}"
output:
  format: text
"#,
            id, template
        );
        fs::write(dir.join(format!("{}.yml", id)), content).unwrap();
    }

    #[test]
    fn test_builtins_parse() {
        for (id, _) in BUILTIN_PROMPTS {
            let def = builtin_prompt(id).unwrap();
            assert_eq!(def.id, *id);
            assert!(def.system.is_some());
        }
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let def = load_prompt(temp_dir.path(), ANSWER_PROMPT_ID).unwrap();
        assert_eq!(def.title, "Grounded answer");
    }

    #[test]
    fn test_workspace_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), ANSWER_PROMPT_ID, "Q: {{query}}");

        let def = load_prompt(temp_dir.path(), ANSWER_PROMPT_ID).unwrap();
        assert_eq!(def.title, "Workspace Prompt");
        assert_eq!(def.template, "Q: {{query}}");
    }

    #[test]
    fn test_mismatched_id_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "other", "x");
        fs::rename(
            prompts_dir(temp_dir.path()).join("other.yml"),
            prompts_dir(temp_dir.path()).join("factcheck.answer.yml"),
        )
        .unwrap();

        assert!(load_prompt(temp_dir.path(), ANSWER_PROMPT_ID).is_err());
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let dir = prompts_dir(temp_dir.path());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.yml"), "invalid: yaml: content:").unwrap();

        assert!(load_prompt(temp_dir.path(), "broken").is_err());
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(list_prompts(temp_dir.path()).unwrap().len(), 2);

        write_prompt(temp_dir.path(), "custom.summary", "x");
        write_prompt(temp_dir.path(), ANSWER_PROMPT_ID, "y");

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(
            prompts,
            vec![
                ANSWER_PROMPT_ID.to_string(),
                EXTRACT_FIELD_PROMPT_ID.to_string(),
                "custom.summary".to_string(),
            ]
        );
    }
}
