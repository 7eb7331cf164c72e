//! Request validation, run before any model call.

use factcheck_core::{AppError, AppResult, Field};
use std::collections::HashSet;

/// Reject blank queries.
pub fn validate_query(query: &str) -> AppResult<()> {
    if query.trim().is_empty() {
        return Err(AppError::Validation("empty query".to_string()));
    }
    Ok(())
}

/// Reject an empty field list, blank names and duplicate names.
pub fn validate_fields(fields: &[Field]) -> AppResult<()> {
    if fields.is_empty() {
        return Err(AppError::Validation("no fields requested".to_string()));
    }

    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(AppError::Validation("empty field name".to_string()));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate field name '{}'",
                field.name
            )));
        }
    }

    Ok(())
}
