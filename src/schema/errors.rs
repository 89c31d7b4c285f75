//! Runtime error taxonomy
//!
//! Error codes:
//! - RECORD_MISSING_REQUIRED
//! - RECORD_UNKNOWN_FIELD
//! - RECORD_TYPE_MISMATCH
//! - RECORD_NULL_VALUE
//! - RECORD_REQUIRED_FIELD_DELETE
//! - RECORD_NOT_AN_OBJECT
//! - RECORD_INVALID_SCHEMA
//! - RECORD_MALFORMED_SCHEMA
//! - RECORD_MALFORMED_CONFIG
//! - RECORD_SCHEMA_IMMUTABLE
//! - RECORD_UNKNOWN_SCHEMA

use thiserror::Error;

/// Result type for runtime record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors raised by the runtime schema layer.
///
/// The typed layer has no error type: its misuse does not compile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    // ==================
    // Construction / update
    // ==================

    /// A required field was not supplied
    #[error("{schema}: required field '{field}' was not supplied")]
    MissingRequired { schema: String, field: String },

    /// The field is not declared by the schema
    #[error("{schema}: field '{field}' is not declared")]
    UnknownField { schema: String, field: String },

    /// The value does not match the declared field type
    #[error("{schema}: field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        schema: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// Null given for a required field that is not nullable
    #[error("{schema}: field '{field}' is not nullable")]
    NullValue { schema: String, field: String },

    /// Attempt to delete a field that has no default
    #[error("{schema}: field '{field}' is required and cannot be deleted")]
    RequiredFieldDelete { schema: String, field: String },

    /// Construction input or patch was not a JSON object
    #[error("{schema}: expected an object, got {actual}")]
    NotAnObject { schema: String, actual: String },

    // ==================
    // Schema errors
    // ==================

    /// The schema failed structural validation
    #[error("schema '{schema}' is invalid: {reason}")]
    InvalidSchema { schema: String, reason: String },

    /// Schema JSON could not be parsed
    #[error("malformed schema: {reason}")]
    MalformedSchema { reason: String },

    /// Config JSON could not be parsed
    #[error("malformed config: {reason}")]
    MalformedConfig { reason: String },

    /// A schema with this name is already registered
    #[error("schema '{schema}' is already registered and immutable")]
    SchemaImmutable { schema: String },

    /// No schema with this name is registered
    #[error("schema '{schema}' is not registered")]
    UnknownSchema { schema: String },
}

impl RecordError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::MissingRequired { .. } => "RECORD_MISSING_REQUIRED",
            RecordError::UnknownField { .. } => "RECORD_UNKNOWN_FIELD",
            RecordError::TypeMismatch { .. } => "RECORD_TYPE_MISMATCH",
            RecordError::NullValue { .. } => "RECORD_NULL_VALUE",
            RecordError::RequiredFieldDelete { .. } => "RECORD_REQUIRED_FIELD_DELETE",
            RecordError::NotAnObject { .. } => "RECORD_NOT_AN_OBJECT",
            RecordError::InvalidSchema { .. } => "RECORD_INVALID_SCHEMA",
            RecordError::MalformedSchema { .. } => "RECORD_MALFORMED_SCHEMA",
            RecordError::MalformedConfig { .. } => "RECORD_MALFORMED_CONFIG",
            RecordError::SchemaImmutable { .. } => "RECORD_SCHEMA_IMMUTABLE",
            RecordError::UnknownSchema { .. } => "RECORD_UNKNOWN_SCHEMA",
        }
    }

    /// Returns the offending field, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            RecordError::MissingRequired { field, .. }
            | RecordError::UnknownField { field, .. }
            | RecordError::TypeMismatch { field, .. }
            | RecordError::NullValue { field, .. }
            | RecordError::RequiredFieldDelete { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// Returns the schema name, if known
    pub fn schema(&self) -> Option<&str> {
        match self {
            RecordError::MissingRequired { schema, .. }
            | RecordError::UnknownField { schema, .. }
            | RecordError::TypeMismatch { schema, .. }
            | RecordError::NullValue { schema, .. }
            | RecordError::RequiredFieldDelete { schema, .. }
            | RecordError::NotAnObject { schema, .. }
            | RecordError::InvalidSchema { schema, .. }
            | RecordError::SchemaImmutable { schema }
            | RecordError::UnknownSchema { schema } => Some(schema.as_str()),
            RecordError::MalformedSchema { .. } | RecordError::MalformedConfig { .. } => None,
        }
    }

    pub(crate) fn missing_required(schema: &str, field: &str) -> Self {
        RecordError::MissingRequired {
            schema: schema.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn unknown_field(schema: &str, field: &str) -> Self {
        RecordError::UnknownField {
            schema: schema.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn null_value(schema: &str, field: &str) -> Self {
        RecordError::NullValue {
            schema: schema.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn required_field_delete(schema: &str, field: &str) -> Self {
        RecordError::RequiredFieldDelete {
            schema: schema.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_schema(schema: &str, reason: impl Into<String>) -> Self {
        RecordError::InvalidSchema {
            schema: schema.to_string(),
            reason: reason.into(),
        }
    }
}
