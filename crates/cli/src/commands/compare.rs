//! Compare command handler.
//!
//! Sets two evaluation reports side by side.

use super::input::{load_report, write_json};
use clap::Args;
use factcheck_engine::{compare, ComparisonReport};
use std::fmt::Write;
use std::path::PathBuf;

/// Compare two evaluation reports
#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Baseline evaluation report (JSON)
    pub baseline: PathBuf,

    /// Candidate evaluation report (JSON)
    pub candidate: PathBuf,

    /// Write the comparison as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the comparison as JSON
    #[arg(long)]
    pub json: bool,
}

impl CompareCommand {
    /// Execute the compare command.
    pub fn execute(&self) -> anyhow::Result<()> {
        tracing::info!("Executing compare command");

        let baseline = load_report(&self.baseline)?;
        let candidate = load_report(&self.candidate)?;
        let comparison = compare(&baseline, &candidate);

        if let Some(path) = &self.output {
            write_json(path, &comparison)?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else {
            print!("{}", render_summary(&comparison));
        }

        Ok(())
    }
}

fn render_summary(comparison: &ComparisonReport) -> String {
    let baseline = &comparison.baseline_metrics;
    let candidate = &comparison.candidate_metrics;
    let differences = &comparison.differences;

    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:>10} {:>10} {:>10}", "", "baseline", "candidate", "diff");
    let _ = writeln!(
        out,
        "{:<16} {:>9.2}% {:>9.2}% {:>9.2}%",
        "accuracy",
        baseline.accuracy * 100.0,
        candidate.accuracy * 100.0,
        differences.accuracy_diff * 100.0
    );
    let _ = writeln!(
        out,
        "{:<16} {:>10.2} {:>10.2} {:>10.2}",
        "avg confidence",
        baseline.avg_confidence,
        candidate.avg_confidence,
        differences.confidence_diff
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Key points compared: {}", comparison.matched_points());
    let _ = writeln!(out, "Agreement rate: {:.2}%", comparison.agreement_rate * 100.0);
    out
}
