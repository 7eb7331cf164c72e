//! Fixed lexical cue tables.
//!
//! Matching is a case-insensitive substring scan. Both tables are lower-case.

/// Phrases signalling the model declined to answer.
pub const REFUSAL_PHRASES: &[&str] = &[
    "cannot answer",
    "don't have enough information",
    "insufficient context",
    "cannot be determined",
    "not enough information",
    "cannot be verified",
    "i don't know",
    "no information provided",
];

/// Phrases signalling the model hedged its answer.
pub const UNCERTAINTY_MARKERS: &[&str] = &[
    "possibly",
    "perhaps",
    "maybe",
    "might",
    "could be",
    "appears to be",
    "seems",
    "likely",
];

/// Lower-case `text` and fold typographic apostrophes to ASCII.
pub fn fold(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Whether `text` contains any refusal phrase.
pub fn contains_refusal(text: &str) -> bool {
    let folded = fold(text);
    REFUSAL_PHRASES
        .iter()
        .any(|phrase| folded.contains(phrase))
}

/// Total occurrences of every uncertainty marker in `text`.
///
/// Repeats count individually, and occurrences of different markers are
/// counted independently even where they overlap.
pub fn count_uncertainty_markers(text: &str) -> usize {
    let folded = fold(text);
    UNCERTAINTY_MARKERS
        .iter()
        .map(|marker| folded.matches(marker).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_lower_case() {
        for phrase in REFUSAL_PHRASES.iter().chain(UNCERTAINTY_MARKERS) {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }

    #[test]
    fn test_refusal_is_case_insensitive() {
        assert!(contains_refusal("I DON'T KNOW."));
        assert!(contains_refusal("The answer Cannot Be Determined from this text"));
        assert!(!contains_refusal("The tower is 330 meters tall."));
    }

    #[test]
    fn test_refusal_with_typographic_apostrophe() {
        assert!(contains_refusal("I don\u{2019}t know"));
    }

    #[test]
    fn test_count_markers() {
        assert_eq!(count_uncertainty_markers("It is 330 meters."), 0);
        assert_eq!(count_uncertainty_markers("Perhaps"), 1);
        assert_eq!(count_uncertainty_markers("maybe, maybe not"), 2);
        assert_eq!(
            count_uncertainty_markers("It seems likely and possibly true"),
            3
        );
    }

    #[test]
    fn test_count_markers_substring_semantics() {
        // "unlikely" contains "likely"
        assert_eq!(count_uncertainty_markers("That is unlikely"), 1);
    }
}
