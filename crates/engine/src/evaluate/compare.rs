//! Side-by-side comparison of two evaluation reports.

use super::{EvaluationReport, KeyPointResult, RecordResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of a record or key point used to match entries across reports.
const MATCH_PREFIX_CHARS: usize = 50;

/// Headline metrics of one report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub accuracy: f64,
    pub avg_confidence: f64,
    pub total_samples: usize,
    pub total_blogs: usize,
}

impl From<&EvaluationReport> for ReportMetrics {
    fn from(report: &EvaluationReport) -> Self {
        Self {
            accuracy: report.accuracy,
            avg_confidence: report.avg_confidence,
            total_samples: report.total_samples,
            total_blogs: report.total_blogs,
        }
    }
}

/// Baseline minus candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDifferences {
    pub accuracy_diff: f64,
    pub confidence_diff: f64,
}

/// One side's verdict on a key point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointVerdict {
    pub factual: bool,
    pub confidence: f64,
    pub correct: bool,
}

impl From<&KeyPointResult> for PointVerdict {
    fn from(point: &KeyPointResult) -> Self {
        Self {
            factual: point.factual,
            confidence: point.confidence,
            correct: point.correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointComparison {
    pub key_point: String,
    pub baseline: PointVerdict,
    pub candidate: PointVerdict,

    /// Both sides reached the same factual verdict
    pub agreement: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordComparison {
    pub blog_text: String,
    pub point_comparisons: Vec<PointComparison>,
}

/// Outcome of comparing two evaluation reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub comparison_date: DateTime<Utc>,
    pub baseline_metrics: ReportMetrics,
    pub candidate_metrics: ReportMetrics,
    pub differences: MetricDifferences,
    pub detailed_comparison: Vec<RecordComparison>,

    /// Agreeing key points over all matched key points
    pub agreement_rate: f64,
}

impl ComparisonReport {
    /// Number of key points found in both reports.
    pub fn matched_points(&self) -> usize {
        self.detailed_comparison
            .iter()
            .map(|record| record.point_comparisons.len())
            .sum()
    }
}

/// Compare `candidate` against `baseline`.
///
/// Records are matched on the first 50 characters of their text and key
/// points on the first 50 characters of the point, in baseline order. The
/// first candidate entry with a matching prefix wins; unmatched entries are
/// left out.
pub fn compare(baseline: &EvaluationReport, candidate: &EvaluationReport) -> ComparisonReport {
    let detailed_comparison: Vec<RecordComparison> = baseline
        .results
        .iter()
        .filter_map(|record| {
            let other = find_record(&candidate.results, &record.blog_text)?;
            Some(RecordComparison {
                blog_text: record.blog_text.clone(),
                point_comparisons: compare_points(record, other),
            })
        })
        .collect();

    let (matched, agreeing) = detailed_comparison
        .iter()
        .flat_map(|record| &record.point_comparisons)
        .fold((0usize, 0usize), |(matched, agreeing), point| {
            (matched + 1, agreeing + usize::from(point.agreement))
        });
    let agreement_rate = if matched == 0 {
        0.0
    } else {
        agreeing as f64 / matched as f64
    };

    tracing::debug!(
        records = detailed_comparison.len(),
        matched,
        agreeing,
        "Compared evaluation reports"
    );

    ComparisonReport {
        comparison_date: Utc::now(),
        baseline_metrics: ReportMetrics::from(baseline),
        candidate_metrics: ReportMetrics::from(candidate),
        differences: MetricDifferences {
            accuracy_diff: baseline.accuracy - candidate.accuracy,
            confidence_diff: baseline.avg_confidence - candidate.avg_confidence,
        },
        detailed_comparison,
        agreement_rate,
    }
}

fn compare_points(baseline: &RecordResult, candidate: &RecordResult) -> Vec<PointComparison> {
    baseline
        .key_points_results
        .iter()
        .filter_map(|point| {
            let key = match_key(&point.key_point);
            let other = candidate
                .key_points_results
                .iter()
                .find(|other| match_key(&other.key_point) == key)?;

            Some(PointComparison {
                key_point: point.key_point.clone(),
                baseline: PointVerdict::from(point),
                candidate: PointVerdict::from(other),
                agreement: point.factual == other.factual,
            })
        })
        .collect()
}

fn find_record<'a>(records: &'a [RecordResult], blog_text: &str) -> Option<&'a RecordResult> {
    let key = match_key(blog_text);
    records
        .iter()
        .find(|record| match_key(&record.blog_text) == key)
}

fn match_key(text: &str) -> &str {
    match text.char_indices().nth(MATCH_PREFIX_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::CORRECT_CONFIDENCE;

    fn point(key_point: &str, factual: bool, confidence: f64) -> KeyPointResult {
        KeyPointResult {
            key_point: key_point.to_string(),
            factual,
            confidence,
            correct: factual && confidence > CORRECT_CONFIDENCE,
            model_answer: String::new(),
        }
    }

    fn report(records: Vec<(&str, Vec<KeyPointResult>)>) -> EvaluationReport {
        EvaluationReport::from_results(
            records
                .into_iter()
                .map(|(text, points)| RecordResult {
                    blog_text: text.to_string(),
                    key_points_results: points,
                })
                .collect(),
        )
    }

    #[test]
    fn test_metrics_and_differences() {
        let baseline = report(vec![("Paris", vec![point("capital", true, 0.9)])]);
        let candidate = report(vec![("Paris", vec![point("capital", false, 0.3)])]);

        let comparison = compare(&baseline, &candidate);
        assert_eq!(comparison.baseline_metrics.accuracy, 1.0);
        assert_eq!(comparison.candidate_metrics.accuracy, 0.0);
        assert_eq!(comparison.differences.accuracy_diff, 1.0);
        assert!((comparison.differences.confidence_diff - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_agreement_on_factual_flag() {
        let baseline = report(vec![(
            "Paris",
            vec![
                point("capital", true, 0.9),
                point("river", true, 0.8),
                point("size", false, 0.1),
            ],
        )]);
        let candidate = report(vec![(
            "Paris",
            vec![
                point("size", false, 0.3),
                point("capital", true, 0.6),
                point("river", false, 0.1),
            ],
        )]);

        let comparison = compare(&baseline, &candidate);
        let points = &comparison.detailed_comparison[0].point_comparisons;
        let keys: Vec<&str> = points.iter().map(|p| p.key_point.as_str()).collect();
        assert_eq!(keys, vec!["capital", "river", "size"]);
        assert!(points[0].agreement);
        assert!(!points[1].agreement);
        assert!(points[2].agreement);
        assert!((comparison.agreement_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_matching_uses_fifty_character_prefix() {
        let prefix = "x".repeat(50);
        let baseline_text = format!("{}-baseline tail", prefix);
        let candidate_text = format!("{}-candidate tail", prefix);
        let baseline = report(vec![(
            baseline_text.as_str(),
            vec![point(&format!("{}-a", prefix), true, 0.9)],
        )]);
        let candidate = report(vec![(
            candidate_text.as_str(),
            vec![point(&format!("{}-b", prefix), true, 0.9)],
        )]);

        let comparison = compare(&baseline, &candidate);
        assert_eq!(comparison.detailed_comparison.len(), 1);
        assert_eq!(comparison.matched_points(), 1);
        assert_eq!(comparison.agreement_rate, 1.0);
    }

    #[test]
    fn test_unmatched_entries_left_out() {
        let baseline = report(vec![
            ("Paris", vec![point("capital", true, 0.9)]),
            ("Lyon", vec![point("river", true, 0.9)]),
        ]);
        let candidate = report(vec![("Paris", vec![point("population", true, 0.9)])]);

        let comparison = compare(&baseline, &candidate);
        assert_eq!(comparison.detailed_comparison.len(), 1);
        assert_eq!(comparison.detailed_comparison[0].blog_text, "Paris");
        assert!(comparison.detailed_comparison[0].point_comparisons.is_empty());
        assert_eq!(comparison.agreement_rate, 0.0);
    }
}
