//! Context normalization: one context block plus the cited sources.

use crate::types::Document;

/// Separator placed between the parts of a context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// A request's context, flattened for prompting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedContext {
    /// Free-form context followed by each document text
    pub context_block: String,

    /// Every supplied document, in caller order
    pub sources: Vec<Document>,
}

impl NormalizedContext {
    /// Whether any context or document text was supplied.
    pub fn has_context(&self) -> bool {
        !self.context_block.is_empty()
    }
}

/// Combine optional free-form context and documents.
///
/// Empty parts are left out of the block; empty documents are still
/// sources. Whitespace counts as text. Free-form context is never a source.
pub fn normalize(context: Option<&str>, documents: Option<&[Document]>) -> NormalizedContext {
    let documents = documents.unwrap_or_default();

    let parts: Vec<&str> = context
        .into_iter()
        .chain(documents.iter().map(Document::text))
        .filter(|part| !part.is_empty())
        .collect();

    let normalized = NormalizedContext {
        context_block: parts.join(CONTEXT_SEPARATOR),
        sources: documents.to_vec(),
    };

    tracing::debug!(
        parts = parts.len(),
        sources = normalized.sources.len(),
        chars = normalized.context_block.len(),
        "Normalized context"
    );

    normalized
}
