//! Error types for filename encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur while building a codec or encoding/decoding filenames.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The format specifier is not one of the recognized shapes, or its
    /// numeric parts are not positive integers (construction path).
    #[error("Invalid format '{format}': {reason}")]
    InvalidFormat { format: String, reason: String },

    /// A field was declared with an empty name.
    #[error("Invalid field name: field names must not be empty")]
    InvalidFieldName,

    /// Two fields in one schema share a name.
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// The values passed to `encode` lack one or more schema fields.
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The values passed to `encode` contain keys the schema does not declare.
    #[error("Unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    /// A value of the wrong kind was passed for a field.
    #[error("Type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A value of the right kind that still cannot be rendered (e.g. NaN).
    #[error("Cannot encode field '{field}': {message}")]
    FieldEncode { field: String, message: String },

    /// The input does not conform to the composite pattern (decoding path).
    #[error("Filename '{input}' does not match pattern '{pattern}'")]
    PatternMismatch { input: String, pattern: String },

    /// A captured substring could not be converted to the field's value type.
    #[error("Cannot decode field '{field}': {message}")]
    FieldDecode { field: String, message: String },

    /// The composite pattern failed to compile.
    #[error("Pattern compile error: {0}")]
    Regex(#[from] regex::Error),

    /// A schema document was not valid JSON or had the wrong shape.
    #[error("Schema parse error: {0}")]
    Schema(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn invalid_format(format: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidFormat {
            format: format.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout filename-codec.
pub type Result<T> = std::result::Result<T, CodecError>;
