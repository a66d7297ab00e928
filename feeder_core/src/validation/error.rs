//! Completeness errors

use crate::logging::codes;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// The exact item that blocks progression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Dimension {code} is missing!")]
    MissingDimension { code: String },

    #[error("{label} is missing!")]
    MissingField { id: String, label: String },
}

impl ValidationError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::MissingDimension { .. } => codes::validation::MISSING_DIMENSION,
            Self::MissingField { .. } => codes::validation::MISSING_FIELD,
        }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Dimension code or field id to focus
    pub fn target(&self) -> &str {
        match self {
            Self::MissingDimension { code } => code,
            Self::MissingField { id, .. } => id,
        }
    }
}
