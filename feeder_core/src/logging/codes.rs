//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the feeder crates log. Each code
//! carries category, severity, recoverability and a recommended action.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Schema loading and checking error codes
pub mod schema {
    use super::Code;

    pub const SCHEMA_IO_ERROR: Code = Code::new("E010");
    pub const SCHEMA_FORMAT_ERROR: Code = Code::new("E011");
    pub const DUPLICATE_DIMENSION_CODE: Code = Code::new("E012");
    pub const DUPLICATE_FIELD_ID: Code = Code::new("E013");
    pub const INVALID_FIELD_OPTIONS: Code = Code::new("E014");
    pub const EMPTY_IDENTIFIER: Code = Code::new("E015");
    pub const SCHEMA_LIMIT_EXCEEDED: Code = Code::new("E016");
}

/// Paste-text parser error codes
pub mod parser {
    use super::Code;

    pub const PATTERN_CONSTRUCTION_FAILED: Code = Code::new("E020");
}

/// Completeness and field validation error codes
pub mod validation {
    use super::Code;

    pub const MISSING_DIMENSION: Code = Code::new("E030");
    pub const MISSING_FIELD: Code = Code::new("E031");
    pub const REMARK_TOO_LONG: Code = Code::new("E032");
    pub const UNKNOWN_FIELD: Code = Code::new("E033");
}

/// Paste dialog workflow error codes
pub mod workflow {
    use super::Code;

    pub const INVALID_TRANSITION: Code = Code::new("E040");
    pub const PASTE_TRUNCATED: Code = Code::new("E041");
}

/// Submission error codes
pub mod submission {
    use super::Code;

    pub const MISSING_CONTACT_FIELD: Code = Code::new("E050");
    pub const ATTACHMENT_LIMIT_EXCEEDED: Code = Code::new("E051");
    pub const TRANSPORT_FAILURE: Code = Code::new("E052");
    pub const PAYLOAD_ENCODING_ERROR: Code = Code::new("E053");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const SCHEMA_LOADED: Code = Code::new("I010");
    pub const PARSE_COMPLETE: Code = Code::new("I020");
    pub const PARSED_DATA_APPLIED: Code = Code::new("I021");
    pub const DIMENSIONS_COMPLETE: Code = Code::new("I030");
    pub const MACHINE_INFO_COMPLETE: Code = Code::new("I031");
    pub const FEEDER_DATA_CLEARED: Code = Code::new("I032");
    pub const SUBMISSION_SENT: Code = Code::new("I050");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTERED: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        "Critical internal error",
        "File a bug report with the log output",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        "Logging or configuration initialization failure",
        "Check FEEDER_* environment variables and the build profile",
    ),
    // Schema
    ErrorMetadata::new(
        "E010",
        "Schema",
        Severity::High,
        true,
        "Schema file could not be read",
        "Check the schema path and file permissions",
    ),
    ErrorMetadata::new(
        "E011",
        "Schema",
        Severity::High,
        true,
        "Schema file is not valid TOML for a feeder schema",
        "Compare the file against the documented schema layout",
    ),
    ErrorMetadata::new(
        "E012",
        "Schema",
        Severity::High,
        true,
        "Dimension code declared more than once",
        "Give every dimension a unique code",
    ),
    ErrorMetadata::new(
        "E013",
        "Schema",
        Severity::High,
        true,
        "Machine-info field id declared more than once",
        "Give every machine-info field a unique id",
    ),
    ErrorMetadata::new(
        "E014",
        "Schema",
        Severity::Medium,
        true,
        "Select field without options, or options on a non-select field",
        "Declare options only on select fields",
    ),
    ErrorMetadata::new(
        "E015",
        "Schema",
        Severity::High,
        true,
        "Empty feeder type, code, id or label",
        "Fill in every identifier in the schema",
    ),
    ErrorMetadata::new(
        "E016",
        "Schema",
        Severity::Medium,
        true,
        "Schema exceeds a configured limit",
        "Reduce the schema or raise the limit in the build profile",
    ),
    // Parser
    ErrorMetadata::new(
        "E020",
        "Parser",
        Severity::Medium,
        true,
        "Extraction pattern could not be built from the schema",
        "Check schema labels and descriptions",
    ),
    // Validation
    ErrorMetadata::new(
        "E030",
        "Validation",
        Severity::Low,
        true,
        "A dimension has no value",
        "Enter the highlighted dimension (use 0 if not applicable)",
    ),
    ErrorMetadata::new(
        "E031",
        "Validation",
        Severity::Low,
        true,
        "A required machine-info field has no value",
        "Fill in the highlighted machine-info field",
    ),
    ErrorMetadata::new(
        "E032",
        "Validation",
        Severity::Low,
        true,
        "Remark exceeds the maximum length",
        "Shorten the remark",
    ),
    ErrorMetadata::new(
        "E033",
        "Validation",
        Severity::Low,
        true,
        "Value given for a field or dimension the schema does not declare",
        "Check the field id or dimension code",
    ),
    // Workflow
    ErrorMetadata::new(
        "E040",
        "Workflow",
        Severity::Low,
        true,
        "Paste dialog action not allowed in the current state",
        "Open the paste dialog before analyzing or applying",
    ),
    ErrorMetadata::new(
        "E041",
        "Workflow",
        Severity::Low,
        true,
        "Pasted text exceeded the paste limits and was only partly scanned",
        "Paste a shorter excerpt of the data sheet",
    ),
    // Submission
    ErrorMetadata::new(
        "E050",
        "Submission",
        Severity::Low,
        true,
        "Required contact field missing",
        "Fill in company name, name and email",
    ),
    ErrorMetadata::new(
        "E051",
        "Submission",
        Severity::Low,
        true,
        "Attachment count or size limit exceeded",
        "Remove attachments or attach smaller files",
    ),
    ErrorMetadata::new(
        "E052",
        "Submission",
        Severity::Medium,
        true,
        "Email transport rejected the submission",
        "Retry the submission; entered data is preserved",
    ),
    ErrorMetadata::new(
        "E053",
        "Submission",
        Severity::Medium,
        true,
        "Submission payload could not be encoded",
        "File a bug report with the log output",
    ),
    // Success
    ErrorMetadata::new(
        "I001",
        "Success",
        Severity::Low,
        true,
        "Logging system initialized",
        "None",
    ),
    ErrorMetadata::new(
        "I010",
        "Success",
        Severity::Low,
        true,
        "Feeder schema loaded",
        "None",
    ),
    ErrorMetadata::new(
        "I020",
        "Success",
        Severity::Low,
        true,
        "Pasted text parsed",
        "None",
    ),
    ErrorMetadata::new(
        "I021",
        "Success",
        Severity::Low,
        true,
        "Parsed data merged into feeder data",
        "None",
    ),
    ErrorMetadata::new(
        "I030",
        "Success",
        Severity::Low,
        true,
        "All dimensions filled",
        "None",
    ),
    ErrorMetadata::new(
        "I031",
        "Success",
        Severity::Low,
        true,
        "Machine information complete",
        "None",
    ),
    ErrorMetadata::new(
        "I032",
        "Success",
        Severity::Low,
        true,
        "Feeder data cleared",
        "None",
    ),
    ErrorMetadata::new(
        "I050",
        "Success",
        Severity::Low,
        true,
        "Submission handed to the email transport",
        "None",
    ),
];

/// Initialize and get the registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            schema::SCHEMA_IO_ERROR,
            schema::SCHEMA_FORMAT_ERROR,
            schema::DUPLICATE_DIMENSION_CODE,
            schema::DUPLICATE_FIELD_ID,
            schema::INVALID_FIELD_OPTIONS,
            schema::EMPTY_IDENTIFIER,
            schema::SCHEMA_LIMIT_EXCEEDED,
            parser::PATTERN_CONSTRUCTION_FAILED,
            validation::MISSING_DIMENSION,
            validation::MISSING_FIELD,
            validation::REMARK_TOO_LONG,
            validation::UNKNOWN_FIELD,
            workflow::INVALID_TRANSITION,
            workflow::PASTE_TRUNCATED,
            submission::MISSING_CONTACT_FIELD,
            submission::ATTACHMENT_LIMIT_EXCEEDED,
            submission::TRANSPORT_FAILURE,
            submission::PAYLOAD_ENCODING_ERROR,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::SCHEMA_LOADED,
            success::PARSE_COMPLETE,
            success::PARSED_DATA_APPLIED,
            success::DIMENSIONS_COMPLETE,
            success::MACHINE_INFO_COMPLETE,
            success::FEEDER_DATA_CLEARED,
            success::SUBMISSION_SENT,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
        assert!(is_recoverable("Z999"));
    }

    #[test]
    fn test_validation_codes_are_recoverable() {
        assert!(is_recoverable(validation::MISSING_DIMENSION.as_str()));
        assert_eq!(get_category(validation::MISSING_FIELD.as_str()), "Validation");
        assert!(!is_recoverable(system::INTERNAL_ERROR.as_str()));
    }
}
