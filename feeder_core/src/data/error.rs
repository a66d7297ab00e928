//! Field edit errors

use crate::logging::codes;
use thiserror::Error;

pub type FieldResult<T> = Result<T, FieldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Remark is limited to {max} characters, got {length}")]
    RemarkTooLong { length: usize, max: usize },

    #[error("Unknown machine-info field '{id}'")]
    UnknownField { id: String },

    #[error("Unknown dimension code '{code}'")]
    UnknownDimension { code: String },
}

impl FieldError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::RemarkTooLong { .. } => codes::validation::REMARK_TOO_LONG,
            Self::UnknownField { .. } | Self::UnknownDimension { .. } => {
                codes::validation::UNKNOWN_FIELD
            }
        }
    }
}
