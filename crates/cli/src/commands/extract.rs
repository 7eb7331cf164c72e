//! Extract command handler.
//!
//! Pulls caller-defined typed fields out of the supplied context.

use super::build_checker;
use super::input::{load_context, load_documents, load_schema, parse_field_spec};
use clap::Args;
use factcheck_core::config::AppConfig;
use factcheck_core::Field;
use factcheck_engine::{ExtractionRequest, ExtractionResult, FieldValue};
use std::fmt::Write;
use std::path::PathBuf;

/// Extract typed fields from context
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// What the extraction is about
    pub query: String,

    /// Free-form context text
    #[arg(long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read free-form context from a file
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    /// JSON or YAML file holding a list of documents
    #[arg(short, long)]
    pub documents: Option<PathBuf>,

    /// Field to extract as name:type[:description] (repeatable)
    #[arg(short, long = "field", value_parser = parse_field_spec)]
    pub fields: Vec<Field>,

    /// JSON or YAML file holding a list of fields
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExtractCommand {
    /// Execute the extract command.
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing extract command");
        tracing::debug!("Extract command options: {:?}", self);

        // Schema fields first, then inline ones
        let mut fields = match &self.schema {
            Some(path) => load_schema(path)?,
            None => Vec::new(),
        };
        fields.extend(self.fields.iter().cloned());

        let request = ExtractionRequest {
            query: self.query.clone(),
            context: load_context(self.context.as_deref(), self.context_file.as_deref())?,
            documents: self.documents.as_deref().map(load_documents).transpose()?,
            fields,
        };

        let checker = build_checker(config)?;
        let result = checker.extract(&request).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{}", render_result(&result));
        }

        Ok(())
    }
}

/// Human-readable rendering of an extraction.
fn render_result(result: &ExtractionResult) -> String {
    let mut out = String::new();

    for (name, value) in &result.data {
        let rendered = match value {
            Some(FieldValue::String(s)) => s.clone(),
            Some(FieldValue::Number(n)) => n.to_string(),
            Some(FieldValue::Integer(i)) => i.to_string(),
            Some(FieldValue::Boolean(b)) => b.to_string(),
            None => format!(
                "(none: {})",
                result.errors.get(name).map(String::as_str).unwrap_or("unknown error")
            ),
        };
        let _ = writeln!(out, "{}: {}", name, rendered);
    }

    if !result.success {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} of {} field(s) failed", result.errors.len(), result.data.len());
    }

    out
}
