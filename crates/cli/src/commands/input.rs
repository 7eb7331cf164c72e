//! Loading command input: context text, document files, field schemas,
//! evaluation datasets and reports.

use anyhow::{bail, Context};
use factcheck_core::{AppError, Field, FieldType};
use factcheck_engine::{Document, EvaluationRecord, EvaluationReport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Resolve context from inline text or a file.
pub fn load_context(text: Option<&str>, file: Option<&Path>) -> anyhow::Result<Option<String>> {
    match (text, file) {
        (Some(text), _) => Ok(Some(text.to_string())),
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read context file {}", path.display()))?;
            Ok(Some(contents))
        }
        (None, None) => Ok(None),
    }
}

/// Load a list of documents from a JSON or YAML file.
pub fn load_documents(path: &Path) -> anyhow::Result<Vec<Document>> {
    let documents: Vec<Document> = load_structured(path)
        .with_context(|| format!("Failed to load documents from {}", path.display()))?;
    tracing::debug!("Loaded {} document(s) from {:?}", documents.len(), path);
    Ok(documents)
}

/// Load a list of fields from a JSON or YAML schema file.
pub fn load_schema(path: &Path) -> anyhow::Result<Vec<Field>> {
    let fields: Vec<Field> = load_structured(path)
        .with_context(|| format!("Failed to load schema from {}", path.display()))?;
    tracing::debug!("Loaded {} field(s) from {:?}", fields.len(), path);
    Ok(fields)
}

/// Load evaluation records from a JSON or YAML file.
pub fn load_dataset(path: &Path) -> anyhow::Result<Vec<EvaluationRecord>> {
    let records: Vec<EvaluationRecord> = load_structured(path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;
    tracing::debug!("Loaded {} record(s) from {:?}", records.len(), path);
    Ok(records)
}

/// Load a previously written evaluation report.
pub fn load_report(path: &Path) -> anyhow::Result<EvaluationReport> {
    load_structured(path)
        .with_context(|| format!("Failed to load evaluation report from {}", path.display()))
}

/// Write `value` as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Parse a `name:type[:description]` field spec.
pub fn parse_field_spec(spec: &str) -> Result<Field, AppError> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let field_type = parts.next().map(str::trim).unwrap_or_default();

    if name.is_empty() || field_type.is_empty() {
        return Err(AppError::Validation(format!(
            "invalid field '{}', expected name:type[:description]",
            spec
        )));
    }

    let field = Field::new(name, field_type.parse::<FieldType>()?);
    Ok(match parts.next().map(str::trim) {
        Some(description) if !description.is_empty() => field.with_description(description),
        _ => field,
    })
}

/// Deserialize a JSON or YAML file, chosen by extension.
fn load_structured<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(&contents)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        other => bail!(
            "unsupported file extension {:?}, expected .json, .yaml or .yml",
            other.unwrap_or("")
        ),
    }
}
