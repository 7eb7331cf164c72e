//! Confidence scoring of raw answers.
//!
//! The score is a lexical heuristic, not a probability: a base value chosen by
//! context presence, forced down on refusals, and reduced by 0.1 per hedging
//! marker. Arithmetic runs in whole tenths so every score is an exact
//! multiple of 0.1.

use crate::phrases::{contains_refusal, count_uncertainty_markers};
use serde::{Deserialize, Serialize};

/// Base score, in tenths, when the model was given context.
const CONTEXT_BASE_TENTHS: i64 = 9;

/// Base score, in tenths, without context.
const NO_CONTEXT_BASE_TENTHS: i64 = 3;

/// Score, in tenths, of any answer containing a refusal phrase.
const REFUSAL_TENTHS: i64 = 1;

/// Scores strictly above this, in tenths, are factual.
const FACTUAL_THRESHOLD_TENTHS: i64 = 5;

/// Confidence above which an answer is classified as factual.
pub const FACTUAL_THRESHOLD: f64 = FACTUAL_THRESHOLD_TENTHS as f64 / 10.0;

/// Scorer output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// Reliability estimate in [0, 1]
    pub confidence: f64,

    /// `confidence > FACTUAL_THRESHOLD`
    pub factual: bool,
}

impl ConfidenceScore {
    fn from_tenths(tenths: i64) -> Self {
        let tenths = tenths.clamp(0, 10);
        Self {
            confidence: tenths as f64 / 10.0,
            factual: tenths > FACTUAL_THRESHOLD_TENTHS,
        }
    }
}

/// Score a raw answer.
///
/// Refusal phrases dominate: when one is present the score is 0.1 whatever
/// else the answer contains. An empty answer keeps the base score.
pub fn score(raw_answer: &str, has_context: bool) -> ConfidenceScore {
    if contains_refusal(raw_answer) {
        tracing::debug!("Answer contains a refusal phrase");
        return ConfidenceScore::from_tenths(REFUSAL_TENTHS);
    }

    let base = if has_context {
        CONTEXT_BASE_TENTHS
    } else {
        NO_CONTEXT_BASE_TENTHS
    };
    let markers = count_uncertainty_markers(raw_answer) as i64;

    let score = ConfidenceScore::from_tenths(base - markers);
    tracing::debug!(
        has_context,
        markers,
        confidence = score.confidence,
        factual = score.factual,
        "Scored answer"
    );
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_with_context() {
        let s = score("The Eiffel Tower is 330 meters tall.", true);
        assert_eq!(s.confidence, 0.9);
        assert!(s.factual);
    }

    #[test]
    fn test_base_without_context() {
        let s = score("The Eiffel Tower is 330 meters tall.", false);
        assert_eq!(s.confidence, 0.3);
        assert!(!s.factual);
    }

    #[test]
    fn test_refusal_forces_low_score() {
        for has_context in [true, false] {
            let s = score("I don't know", has_context);
            assert_eq!(s.confidence, 0.1);
            assert!(!s.factual);
        }
    }

    #[test]
    fn test_refusal_overrides_markers() {
        let s = score(
            "Perhaps it might be tall, but this cannot be verified",
            true,
        );
        assert_eq!(s.confidence, 0.1);
    }

    #[test]
    fn test_each_marker_subtracts_a_tenth() {
        let answers = [
            "It is tall.",
            "It is possibly tall.",
            "It is possibly perhaps tall.",
            "It is possibly perhaps maybe tall.",
            "It is possibly perhaps maybe tall, it seems.",
        ];
        let expected = [0.9, 0.8, 0.7, 0.6, 0.5];

        for (answer, want) in answers.iter().zip(expected) {
            assert_eq!(score(answer, true).confidence, want, "{}", answer);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        // 0.9 - 4 markers = 0.5, not above the threshold
        let s = score("maybe maybe maybe maybe", true);
        assert_eq!(s.confidence, 0.5);
        assert!(!s.factual);

        let s = score("maybe maybe maybe", true);
        assert_eq!(s.confidence, 0.6);
        assert!(s.factual);
    }

    #[test]
    fn test_clamped_at_zero() {
        let hedged = "maybe ".repeat(25);
        let s = score(&hedged, true);
        assert_eq!(s.confidence, 0.0);
        assert!(!s.factual);

        let s = score("perhaps perhaps perhaps perhaps", false);
        assert_eq!(s.confidence, 0.0);
    }

    #[test]
    fn test_always_within_bounds() {
        for n in 0..40 {
            let answer = "it seems ".repeat(n);
            for has_context in [true, false] {
                let s = score(&answer, has_context);
                assert!((0.0..=1.0).contains(&s.confidence));
            }
        }
    }

    #[test]
    fn test_empty_answer_keeps_base() {
        let s = score("", true);
        assert_eq!(s.confidence, 0.9);
        assert!(s.factual);

        let s = score("", false);
        assert_eq!(s.confidence, 0.3);
        assert!(!s.factual);
    }

    #[test]
    fn test_case_insensitive_markers() {
        assert_eq!(score("PERHAPS so", true).confidence, 0.8);
    }
}
