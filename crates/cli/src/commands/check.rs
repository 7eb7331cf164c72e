//! Check command handler.
//!
//! Answers a question from the supplied context and reports how far the
//! answer can be trusted.

use super::build_checker;
use super::input::{load_context, load_documents};
use clap::Args;
use factcheck_core::config::AppConfig;
use factcheck_engine::{FactCheckRequest, FactCheckResult, DEFAULT_SNIPPET_LENGTH};
use std::fmt::Write;
use std::path::PathBuf;

/// Answer a question from context and score the answer
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Statement or question to verify
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

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Execute the check command.
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing check command");
        tracing::debug!("Check command options: {:?}", self);

        let request = FactCheckRequest {
            query: self.query.clone(),
            context: load_context(self.context.as_deref(), self.context_file.as_deref())?,
            documents: self.documents.as_deref().map(load_documents).transpose()?,
        };

        let checker = build_checker(config)?;
        let result = checker.fact_check(&request).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{}", render_result(&result));
        }

        Ok(())
    }
}

/// Human-readable rendering of a fact check.
fn render_result(result: &FactCheckResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.answer.trim());
    let _ = writeln!(out);
    let _ = writeln!(out, "Confidence: {:.1}", result.confidence);
    let _ = writeln!(out, "Factual: {}", if result.factual { "yes" } else { "no" });

    if !result.sources.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sources:");
        for (i, source) in result.sources.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", i + 1, source.snippet(DEFAULT_SNIPPET_LENGTH));
        }
    }

    out
}
