//! Extraction schema types.
//!
//! A [`Field`] names one value the caller wants pulled out of the context,
//! together with the scalar type its raw model answer is coerced into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Declared scalar type of an extraction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
}

impl FieldType {
    /// All supported types, in documentation order.
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Integer,
        FieldType::Boolean,
    ];

    /// Get the canonical type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    /// Parse a type name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" | "text" => Ok(Self::String),
            "number" | "float" => Ok(Self::Number),
            "integer" | "int" => Ok(Self::Integer),
            "boolean" | "bool" => Ok(Self::Boolean),
            other => Err(AppError::Validation(format!(
                "unknown field type '{}'. Supported: {}",
                other,
                FieldType::ALL.map(|t| t.as_str()).join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extraction target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within a request
    pub name: String,

    /// What the value means, passed to the model verbatim
    #[serde(default)]
    pub description: String,

    /// Declared type of the value
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    /// Create a new field with an empty description.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            field_type,
        }
    }

    /// Set the field description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_parsing() {
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::String);
        assert_eq!("Number".parse::<FieldType>().unwrap(), FieldType::Number);
        assert_eq!("INT".parse::<FieldType>().unwrap(), FieldType::Integer);
        assert_eq!(" bool ".parse::<FieldType>().unwrap(), FieldType::Boolean);
    }

    #[test]
    fn test_unknown_field_type_is_validation_error() {
        let err = "date".parse::<FieldType>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_field_deserialization() {
        let json = r#"{"name": "population", "type": "number"}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "population");
        assert_eq!(field.field_type, FieldType::Number);
        assert!(field.description.is_empty());

        let bad = r#"{"name": "x", "type": "matrix"}"#;
        assert!(serde_json::from_str::<Field>(bad).is_err());
    }

    #[test]
    fn test_field_serializes_type_name() {
        let field = Field::new("active", FieldType::Boolean).with_description("Is it active?");
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "boolean");
        assert_eq!(value["description"], "Is it active?");
    }
}
