//! Result assembly.

use crate::extract::FieldOutcome;
use crate::normalize::NormalizedContext;
use crate::scoring::ConfidenceScore;
use crate::types::{ExtractionResult, FactCheckResult};
use std::collections::BTreeMap;

/// Build a fact check result. Sources keep caller order.
pub fn assemble_fact_check(
    answer: String,
    score: ConfidenceScore,
    context: NormalizedContext,
) -> FactCheckResult {
    FactCheckResult {
        factual: score.factual,
        answer,
        confidence: score.confidence,
        sources: context.sources,
    }
}

/// Build an extraction result from per-field outcomes.
///
/// Every field gets a `data` entry; failed fields map to null and get an
/// `errors` entry. Input order does not matter.
pub fn assemble_extraction(
    outcomes: impl IntoIterator<Item = (String, FieldOutcome)>,
) -> ExtractionResult {
    let mut data = BTreeMap::new();
    let mut errors = BTreeMap::new();

    for (name, outcome) in outcomes {
        match outcome {
            Ok(value) => {
                data.insert(name, Some(value));
            }
            Err(e) => {
                errors.insert(name.clone(), e.to_string());
                data.insert(name, None);
            }
        }
    }

    ExtractionResult {
        success: errors.is_empty(),
        data,
        errors,
    }
}
