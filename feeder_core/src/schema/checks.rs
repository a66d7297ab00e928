//! Structural checks applied to every loaded schema

use super::error::SchemaError;
use super::types::{FeederSchema, FieldType};
use crate::config::compile_time::fields::{
    MAX_DIMENSION_CODES, MAX_LABEL_LENGTH, MAX_MACHINE_INFO_FIELDS,
};
use std::collections::HashSet;

/// Collect every structural problem in `schema`
pub fn check_schema(schema: &FeederSchema) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if schema.feeder_type.trim().is_empty() {
        errors.push(SchemaError::empty_identifier("feeder type"));
    }

    check_dimensions(schema, &mut errors);
    check_machine_info(schema, &mut errors);

    errors
}

fn check_dimensions(schema: &FeederSchema, errors: &mut Vec<SchemaError>) {
    if schema.dimensions.len() > MAX_DIMENSION_CODES {
        errors.push(SchemaError::limit_exceeded(
            "dimension codes",
            schema.dimensions.len(),
            MAX_DIMENSION_CODES,
        ));
    }

    let mut seen = HashSet::new();
    for spec in schema.dimensions.iter() {
        if spec.code.trim().is_empty() {
            errors.push(SchemaError::empty_identifier("dimension code"));
            continue;
        }
        if spec.description.trim().is_empty() {
            errors.push(SchemaError::empty_identifier("dimension description"));
        }
        check_label_length("dimension description", &spec.description, errors);

        if !seen.insert(spec.code.as_str()) {
            errors.push(SchemaError::DuplicateDimensionCode {
                code: spec.code.clone(),
            });
        }
    }
}

fn check_machine_info(schema: &FeederSchema, errors: &mut Vec<SchemaError>) {
    if schema.machine_info.len() > MAX_MACHINE_INFO_FIELDS {
        errors.push(SchemaError::limit_exceeded(
            "machine-info fields",
            schema.machine_info.len(),
            MAX_MACHINE_INFO_FIELDS,
        ));
    }

    let mut seen = HashSet::new();
    for field in schema.machine_info.iter() {
        if field.id.trim().is_empty() {
            errors.push(SchemaError::empty_identifier("field id"));
            continue;
        }
        if field.label.trim().is_empty() {
            errors.push(SchemaError::empty_identifier("field label"));
        }
        check_label_length("field label", &field.label, errors);

        if !seen.insert(field.id.as_str()) {
            errors.push(SchemaError::DuplicateFieldId {
                id: field.id.clone(),
            });
        }

        let has_options = field
            .options
            .as_ref()
            .is_some_and(|options| !options.is_empty());
        match field.field_type {
            FieldType::Select if !has_options => {
                errors.push(SchemaError::MissingSelectOptions {
                    id: field.id.clone(),
                });
            }
            FieldType::Text | FieldType::Number if field.options.is_some() => {
                errors.push(SchemaError::UnexpectedOptions {
                    id: field.id.clone(),
                });
            }
            _ => {}
        }
    }
}

fn check_label_length(what: &str, label: &str, errors: &mut Vec<SchemaError>) {
    let length = label.chars().count();
    if length > MAX_LABEL_LENGTH {
        errors.push(SchemaError::limit_exceeded(what, length, MAX_LABEL_LENGTH));
    }
}
