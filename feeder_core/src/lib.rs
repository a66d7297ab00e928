// Internal modules
pub mod config;
pub mod data;
#[macro_use]
pub mod logging;
pub mod parser;
pub mod schema;
pub mod validation;

// Re-export key types for library consumers
pub use data::{FeederData, FieldError, FormStore, ParsedConfiguration};
pub use parser::{parse_configuration_text, ConfigurationParser, ParseError};
pub use schema::{DimensionSchema, FeederSchema, MachineInfoSchema, SchemaError};
pub use validation::{check_completeness, CompletenessReport, ValidationError};
