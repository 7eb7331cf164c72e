//! Factcheck Core Library
//!
//! This crate provides the foundational utilities shared by every factcheck crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Extraction schema types (`Field`, `FieldType`)

pub mod config;
pub mod error;
pub mod logging;
pub mod schema;

// Re-export commonly used types
pub use config::{AppConfig, EngineConfig};
pub use error::{AppError, AppResult};
pub use schema::{Field, FieldType};
