//! Error types for schema loading and checking

use crate::logging::codes;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema error types
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("Failed to read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema text is not a valid feeder schema document
    #[error("Invalid schema format: {message}")]
    Format { message: String },

    /// Dimension code declared twice
    #[error("Duplicate dimension code '{code}'")]
    DuplicateDimensionCode { code: String },

    /// Field id declared twice
    #[error("Duplicate machine-info field id '{id}'")]
    DuplicateFieldId { id: String },

    /// Select field declared without options
    #[error("Select field '{id}' must declare options")]
    MissingSelectOptions { id: String },

    /// Options declared on a text or number field
    #[error("Field '{id}' declares options but is not a select field")]
    UnexpectedOptions { id: String },

    /// Empty feeder type, code, id, label or description
    #[error("Empty {what} in schema")]
    EmptyIdentifier { what: String },

    /// Compile-time limit exceeded
    #[error("Schema limit exceeded: {limit_type} has {actual}, maximum allowed is {limit}")]
    LimitExceeded {
        limit_type: String,
        actual: usize,
        limit: usize,
    },

    /// Several problems found while checking one schema
    #[error("Schema has {} problem(s): {}", .0.len(), join_errors(.0))]
    Invalid(Vec<SchemaError>),
}

fn join_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl SchemaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub fn empty_identifier(what: &str) -> Self {
        Self::EmptyIdentifier {
            what: what.to_string(),
        }
    }

    pub fn limit_exceeded(limit_type: &str, actual: usize, limit: usize) -> Self {
        Self::LimitExceeded {
            limit_type: limit_type.to_string(),
            actual,
            limit,
        }
    }

    /// Get appropriate code for logging system
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Io { .. } => codes::schema::SCHEMA_IO_ERROR,
            Self::Format { .. } => codes::schema::SCHEMA_FORMAT_ERROR,
            Self::DuplicateDimensionCode { .. } => codes::schema::DUPLICATE_DIMENSION_CODE,
            Self::DuplicateFieldId { .. } => codes::schema::DUPLICATE_FIELD_ID,
            Self::MissingSelectOptions { .. } | Self::UnexpectedOptions { .. } => {
                codes::schema::INVALID_FIELD_OPTIONS
            }
            Self::EmptyIdentifier { .. } => codes::schema::EMPTY_IDENTIFIER,
            Self::LimitExceeded { .. } => codes::schema::SCHEMA_LIMIT_EXCEEDED,
            Self::Invalid(errors) => errors
                .first()
                .map(|e| e.error_code())
                .unwrap_or(codes::schema::SCHEMA_FORMAT_ERROR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_problem() {
        let error = SchemaError::Invalid(vec![
            SchemaError::DuplicateFieldId {
                id: "remark".to_string(),
            },
            SchemaError::empty_identifier("dimension code"),
        ]);

        let message = error.to_string();
        assert!(message.starts_with("Schema has 2 problem(s)"));
        assert!(message.contains("'remark'"));
        assert_eq!(error.error_code(), codes::schema::DUPLICATE_FIELD_ID);
    }
}
