//! TOML schema loading

use super::checks::check_schema;
use super::error::{SchemaError, SchemaResult};
use super::types::FeederSchema;
use crate::logging::codes;
use crate::{log_error, log_success};
use std::fs;
use std::path::Path;

/// Parse and check a schema document
pub fn parse_schema(text: &str) -> SchemaResult<FeederSchema> {
    let schema: FeederSchema =
        toml::from_str(text).map_err(|e| SchemaError::format(e.to_string()))?;

    let mut errors = check_schema(&schema);
    match errors.len() {
        0 => Ok(schema),
        1 => Err(errors.remove(0)),
        _ => Err(SchemaError::Invalid(errors)),
    }
}

/// Read, parse and check a schema file
pub fn load_schema(path: &Path) -> SchemaResult<FeederSchema> {
    let text = fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;

    match parse_schema(&text) {
        Ok(schema) => {
            log_success!(
                codes::success::SCHEMA_LOADED,
                "Feeder schema loaded",
                "path" => path.display(),
                "feeder_type" => &schema.feeder_type,
                "dimensions" => schema.dimensions.len(),
                "fields" => schema.machine_info.len()
            );
            Ok(schema)
        }
        Err(e) => {
            log_error!(
                e.error_code(),
                "Feeder schema rejected",
                "path" => path.display(),
                "error" => &e
            );
            Err(e)
        }
    }
}
