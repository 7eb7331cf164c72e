//! Model evaluation over a labelled dataset.
//!
//! Each dataset record pairs a source text with the key points it supports,
//! one per line. Every key point is fact-checked against its source text; a
//! point counts as correct when it is judged factual with confidence above
//! [`CORRECT_CONFIDENCE`]. Reports from two runs can be set side by side with
//! [`compare`].

mod compare;

pub use compare::{
    compare, ComparisonReport, MetricDifferences, PointComparison, PointVerdict,
    RecordComparison, ReportMetrics,
};

use crate::checker::FactChecker;
use crate::types::FactCheckRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence a factual verdict must exceed to count as correct.
pub const CORRECT_CONFIDENCE: f64 = 0.7;

/// Characters of source text kept in a report.
pub const EXCERPT_CHARS: usize = 200;

/// One labelled dataset entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Source text the key points were drawn from
    pub input: String,

    /// Key points, one per line
    pub output: String,
}

impl EvaluationRecord {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Non-blank key point lines, trimmed.
    pub fn key_points(&self) -> impl Iterator<Item = &str> {
        self.output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Verdict on a single key point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPointResult {
    pub key_point: String,

    #[serde(default)]
    pub factual: bool,

    #[serde(default)]
    pub confidence: f64,

    /// Factual with confidence above [`CORRECT_CONFIDENCE`]
    #[serde(default)]
    pub correct: bool,

    /// Model answer, or the error text when the check failed
    #[serde(default)]
    pub model_answer: String,
}

/// Verdicts for every key point of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    /// Source text excerpt
    pub blog_text: String,

    #[serde(default)]
    pub key_points_results: Vec<KeyPointResult>,
}

/// Outcome of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Correct key points over all key points
    #[serde(default)]
    pub accuracy: f64,

    #[serde(default)]
    pub avg_confidence: f64,

    /// Number of key points checked
    #[serde(default)]
    pub total_samples: usize,

    /// Number of records evaluated
    #[serde(default)]
    pub total_blogs: usize,

    pub evaluation_date: DateTime<Utc>,

    #[serde(default)]
    pub results: Vec<RecordResult>,
}

impl EvaluationReport {
    /// Aggregate per-record results into a report.
    pub fn from_results(results: Vec<RecordResult>) -> Self {
        let points: Vec<&KeyPointResult> = results
            .iter()
            .flat_map(|record| &record.key_points_results)
            .collect();

        let total = points.len();
        let (accuracy, avg_confidence) = if total == 0 {
            (0.0, 0.0)
        } else {
            let correct = points.iter().filter(|p| p.correct).count();
            let confidence: f64 = points.iter().map(|p| p.confidence).sum();
            (correct as f64 / total as f64, confidence / total as f64)
        };

        Self {
            accuracy,
            avg_confidence,
            total_samples: total,
            total_blogs: results.len(),
            evaluation_date: Utc::now(),
            results,
        }
    }
}

/// Fact-check the key points of the first `samples` records.
///
/// Key points run one after another. A failed check is recorded as an
/// incorrect, non-factual verdict with zero confidence and never aborts the
/// run.
pub async fn evaluate(
    checker: &FactChecker,
    records: &[EvaluationRecord],
    samples: usize,
) -> EvaluationReport {
    let selected = &records[..samples.min(records.len())];
    tracing::info!(
        "Evaluating {} of {} record(s)",
        selected.len(),
        records.len()
    );

    let mut results = Vec::with_capacity(selected.len());
    for (index, record) in selected.iter().enumerate() {
        let mut key_points_results = Vec::new();

        for key_point in record.key_points() {
            let request = FactCheckRequest::new(key_point).with_context(record.input.as_str());
            let result = match checker.fact_check(&request).await {
                Ok(result) => KeyPointResult {
                    key_point: key_point.to_string(),
                    factual: result.factual,
                    confidence: result.confidence,
                    correct: result.factual && result.confidence > CORRECT_CONFIDENCE,
                    model_answer: result.answer,
                },
                Err(e) => {
                    tracing::warn!("Key point check failed: {}", e);
                    KeyPointResult {
                        key_point: key_point.to_string(),
                        factual: false,
                        confidence: 0.0,
                        correct: false,
                        model_answer: e.to_string(),
                    }
                }
            };
            key_points_results.push(result);
        }

        tracing::debug!(
            record = index + 1,
            points = key_points_results.len(),
            "Evaluated record"
        );
        results.push(RecordResult {
            blog_text: excerpt(&record.input, EXCERPT_CHARS),
            key_points_results,
        });
    }

    let report = EvaluationReport::from_results(results);
    tracing::info!(
        accuracy = report.accuracy,
        avg_confidence = report.avg_confidence,
        points = report.total_samples,
        "Evaluation complete"
    );
    report
}

/// First `max_chars` characters of `text`, with `...` when anything was cut.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
