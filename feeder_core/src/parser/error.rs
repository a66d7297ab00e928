//! Parser error types

use crate::logging::codes;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Message shown to the user for any parse failure
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse the pasted data. Please check the format.";

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// A schema literal produced a pattern the regex engine refused
    #[error("Failed to build pattern for '{target}': {source}")]
    PatternConstruction {
        target: String,
        #[source]
        source: regex::Error,
    },
}

impl ParseError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::PatternConstruction { .. } => codes::parser::PATTERN_CONSTRUCTION_FAILED,
        }
    }

    pub fn user_message(&self) -> &'static str {
        PARSE_FAILURE_MESSAGE
    }
}
