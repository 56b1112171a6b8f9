use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for annoschema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Bytes that do not decode into the requested message type.
    #[error("Malformed {message_type}: {reason}")]
    MalformedInput {
        message_type: &'static str,
        reason: String,
    },

    /// A value outside the representable domain of its wire field.
    #[error("Value {value} out of range for field `{field}`")]
    Range { field: &'static str, value: i64 },

    /// A map field was given the same key twice.
    #[error("Duplicate map key `{key}`")]
    DuplicateKey { key: String },

    #[error("Unknown annotation type code {code} (known codes: {known})")]
    UnknownCode { code: i32, known: String },

    #[error("Unknown annotation type name '{name}' (known names: {known})")]
    UnknownName { name: String, known: String },

    #[error("Annotation type '{0}' has no collection message")]
    UnsupportedKind(String),

    #[error("Invalid annotation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse annotation JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write annotation JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl SchemaError {
    /// Wraps a prost decode failure for the named message type.
    pub(crate) fn malformed(message_type: &'static str, source: prost::DecodeError) -> Self {
        SchemaError::MalformedInput {
            message_type,
            reason: source.to_string(),
        }
    }
}
