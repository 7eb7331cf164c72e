//! Request and result types for fact checking and extraction.

use factcheck_core::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum snippet length used for human-readable source listings.
pub const DEFAULT_SNIPPET_LENGTH: usize = 200;

/// A caller-supplied source passage.
///
/// Documents are immutable once constructed. Their order in a request is the
/// citation order of the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Passage text. `content` is accepted as an alias on input.
    #[serde(alias = "content")]
    text: String,

    /// Arbitrary caller metadata, returned untouched
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Create a document without metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a document with metadata.
    pub fn with_metadata(
        text: impl Into<String>,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.metadata
    }

    /// Text truncated to at most `max_len` bytes at a word boundary, with a
    /// trailing `...` when anything was cut.
    pub fn snippet(&self, max_len: usize) -> String {
        truncate_snippet(&self.text, max_len)
    }
}

/// Truncate text to at most `max_len` bytes, preferring a word boundary.
fn truncate_snippet(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }

    let truncated = &text[..cut];
    match truncated.rfind(char::is_whitespace) {
        Some(last_space) if last_space > 0 => format!("{}...", &truncated[..last_space]),
        _ => format!("{}...", truncated),
    }
}

/// Input of a fact check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactCheckRequest {
    /// Statement or question to verify
    pub query: String,

    /// Free-form context, not cited as a source
    #[serde(default)]
    pub context: Option<String>,

    /// Source passages, cited in order
    #[serde(default)]
    pub documents: Option<Vec<Document>>,
}

impl FactCheckRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = Some(documents);
        self
    }
}

/// Input of a structured extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// What the extraction is about
    pub query: String,

    /// Free-form context
    #[serde(default)]
    pub context: Option<String>,

    /// Source passages
    #[serde(default)]
    pub documents: Option<Vec<Document>>,

    /// Values to extract; names must be unique
    pub fields: Vec<Field>,
}

impl ExtractionRequest {
    pub fn new(query: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            query: query.into(),
            fields,
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = Some(documents);
        self
    }
}

/// Outcome of a fact check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    /// Whether the answer is considered reliable
    pub factual: bool,

    /// Raw model answer
    pub answer: String,

    /// Heuristic reliability in [0, 1]
    pub confidence: f64,

    /// Documents the answer was grounded on, in request order
    pub sources: Vec<Document>,
}

/// A coerced extraction value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
}

/// Outcome of a structured extraction.
///
/// `data` has one entry per requested field (null when the field failed);
/// `errors` has one entry per failed field. Both are ordered by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// True only when no field failed
    pub success: bool,

    pub data: BTreeMap<String, Option<FieldValue>>,

    pub errors: BTreeMap<String, String>,
}
