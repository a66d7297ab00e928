//! Feeder schemas: dimension codes and machine-info fields
//!
//! A schema is immutable once loaded. Codes and ids are unique and their
//! declaration order drives validation, parsing and rendering order.

pub mod checks;
pub mod error;
pub mod loader;
pub mod types;

pub use checks::check_schema;
pub use error::{SchemaError, SchemaResult};
pub use loader::{load_schema, parse_schema};
pub use types::{
    DimensionSchema, DimensionSpec, FeederSchema, FieldType, MachineInfoField, MachineInfoSchema,
    REMARK_FIELD_ID,
};
