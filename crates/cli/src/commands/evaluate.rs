//! Evaluate command handler.
//!
//! Fact-checks the key points of a labelled dataset and reports how often
//! the model's verdicts hold up.

use super::build_checker;
use super::input::{load_dataset, write_json};
use clap::Args;
use factcheck_core::config::AppConfig;
use factcheck_engine::{evaluate, EvaluationReport};
use std::fmt::Write;
use std::path::PathBuf;

/// Evaluate the model against a labelled dataset
#[derive(Args, Debug)]
pub struct EvaluateCommand {
    /// JSON or YAML file holding `{input, output}` records
    #[arg(short, long)]
    pub dataset: PathBuf,

    /// Number of records to evaluate
    #[arg(short, long, default_value_t = 10)]
    pub samples: usize,

    /// Write the full report as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

impl EvaluateCommand {
    /// Execute the evaluate command.
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing evaluate command");
        tracing::debug!("Evaluate command options: {:?}", self);

        let records = load_dataset(&self.dataset)?;
        let checker = build_checker(config)?;
        let report = evaluate(&checker, &records, self.samples).await;

        if let Some(path) = &self.output {
            write_json(path, &report)?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_summary(&report));
        }

        Ok(())
    }
}

fn render_summary(report: &EvaluationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Records evaluated: {}", report.total_blogs);
    let _ = writeln!(out, "Key points checked: {}", report.total_samples);
    let _ = writeln!(out, "Accuracy: {:.2}%", report.accuracy * 100.0);
    let _ = writeln!(out, "Average confidence: {:.2}", report.avg_confidence);
    out
}
