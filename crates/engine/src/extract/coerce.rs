//! Coercion of raw field answers into typed values.
//!
//! Each [`FieldType`] maps to one coercer through [`strategy_for`].

use crate::types::FieldValue;
use factcheck_core::FieldType;
use regex_lite::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Why a raw answer could not be coerced. Recorded per field, never returned
/// from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("no numeric value in answer '{0}'")]
    NoNumber(String),

    #[error("'{0}' is not a whole number")]
    NotInteger(String),

    #[error("'{0}' is not a yes/no value")]
    NotBoolean(String),

    #[error("malformed digit grouping in '{0}'")]
    MalformedNumber(String),

    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// Signature shared by every coercer. Input is the trimmed raw answer.
pub type Coercer = fn(&str) -> Result<FieldValue, CoercionError>;

/// First numeric token: optional sign, `1,234`-style thousands groups or
/// plain digits, optional decimals. Bare decimals such as `.5` also match.
static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|[-+]?\.\d+")
        .expect("number pattern is a valid regex")
});

const TRUE_WORDS: &[&str] = &["yes", "true", "1", "y", "t"];
const FALSE_WORDS: &[&str] = &["no", "false", "0", "n", "f"];

/// Coercer for a field type.
pub fn strategy_for(field_type: FieldType) -> Coercer {
    match field_type {
        FieldType::String => coerce_string,
        FieldType::Number => coerce_number,
        FieldType::Integer => coerce_integer,
        FieldType::Boolean => coerce_boolean,
    }
}

/// Coerce a raw answer into `field_type`.
pub fn coerce(field_type: FieldType, raw: &str) -> Result<FieldValue, CoercionError> {
    strategy_for(field_type)(raw.trim())
}

fn coerce_string(raw: &str) -> Result<FieldValue, CoercionError> {
    Ok(FieldValue::String(raw.to_string()))
}

fn coerce_number(raw: &str) -> Result<FieldValue, CoercionError> {
    first_number(raw).map(FieldValue::Number)
}

fn coerce_integer(raw: &str) -> Result<FieldValue, CoercionError> {
    let value = first_number(raw)?;

    if value.fract() != 0.0 {
        return Err(CoercionError::NotInteger(raw.to_string()));
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(CoercionError::OutOfRange(raw.to_string()));
    }

    Ok(FieldValue::Integer(value as i64))
}

fn coerce_boolean(raw: &str) -> Result<FieldValue, CoercionError> {
    let word = raw
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    if TRUE_WORDS.contains(&word.as_str()) {
        Ok(FieldValue::Boolean(true))
    } else if FALSE_WORDS.contains(&word.as_str()) {
        Ok(FieldValue::Boolean(false))
    } else {
        Err(CoercionError::NotBoolean(raw.to_string()))
    }
}

/// Parse the first numeric token of `text`.
fn first_number(text: &str) -> Result<f64, CoercionError> {
    let found = NUMBER_TOKEN
        .find(text)
        .ok_or_else(|| CoercionError::NoNumber(text.to_string()))?;
    let mut token = found.as_str();

    // "1,2345" and "10,000,00" stop early inside a digit group
    if token.contains(',') && continues_digit_group(&text[found.end()..]) {
        return Err(CoercionError::MalformedNumber(text.to_string()));
    }

    // A sign glued to a word is a hyphen ("COVID-19"), not a sign
    let glued = text[..found.start()]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    if glued {
        token = token.trim_start_matches(['-', '+']);
    }

    let value: f64 = token
        .replace(',', "")
        .parse()
        .map_err(|_| CoercionError::NoNumber(text.to_string()))?;

    if !value.is_finite() {
        return Err(CoercionError::OutOfRange(text.to_string()));
    }
    Ok(value)
}

/// Whether `rest` carries on the digit group a grouped token ended in.
fn continues_digit_group(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some(',') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}
