//! Completeness checks over a feeder snapshot
//!
//! All functions are pure. Declaration order decides which missing item is
//! reported first.

use super::error::{ValidationError, ValidationResult};
use crate::data::FeederData;
use crate::schema::{DimensionSchema, FeederSchema, MachineInfoField, MachineInfoSchema};
use serde::Serialize;

/// True iff every declared dimension code is set
pub fn all_dimensions_filled(data: &FeederData, schema: &DimensionSchema) -> bool {
    first_missing_dimension(data, schema).is_none()
}

/// True iff every non-exempt field is set; extra snapshot keys are ignored
pub fn machine_info_complete(data: &FeederData, schema: &MachineInfoSchema) -> bool {
    first_missing_field(data, schema).is_none()
}

pub fn first_missing_dimension<'a>(
    data: &FeederData,
    schema: &'a DimensionSchema,
) -> Option<&'a str> {
    schema.codes().find(|code| !data.is_dimension_set(code))
}

pub fn first_missing_field<'a>(
    data: &FeederData,
    schema: &'a MachineInfoSchema,
) -> Option<&'a MachineInfoField> {
    schema.required().find(|field| !data.is_field_set(&field.id))
}

/// Every unset non-exempt field, in declaration order
pub fn missing_fields<'a>(
    data: &FeederData,
    schema: &'a MachineInfoSchema,
) -> Vec<&'a MachineInfoField> {
    schema
        .required()
        .filter(|field| !data.is_field_set(&field.id))
        .collect()
}

/// Dimensions first, then machine info
pub fn check_completeness(data: &FeederData, schema: &FeederSchema) -> ValidationResult<()> {
    if let Some(code) = first_missing_dimension(data, &schema.dimensions) {
        return Err(ValidationError::MissingDimension {
            code: code.to_string(),
        });
    }

    if let Some(field) = first_missing_field(data, &schema.machine_info) {
        return Err(ValidationError::MissingField {
            id: field.id.clone(),
            label: field.label.clone(),
        });
    }

    Ok(())
}

/// Everything still missing for one feeder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletenessReport {
    pub feeder_type: String,
    pub missing_dimensions: Vec<String>,
    pub missing_fields: Vec<String>,
}

impl CompletenessReport {
    pub fn build(data: &FeederData, schema: &FeederSchema) -> Self {
        Self {
            feeder_type: schema.feeder_type.clone(),
            missing_dimensions: schema
                .dimensions
                .codes()
                .filter(|code| !data.is_dimension_set(code))
                .map(str::to_string)
                .collect(),
            missing_fields: missing_fields(data, &schema.machine_info)
                .into_iter()
                .map(|field| field.id.clone())
                .collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_dimensions.is_empty() && self.missing_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::REMARK_FIELD_ID;
    use assert_matches::assert_matches;

    fn schema() -> FeederSchema {
        FeederSchema::new(
            "bowl",
            DimensionSchema::from_pairs(&[("A", "Bowl Diameter"), ("B", "Height"), ("C", "Track")]),
        )
    }

    fn filled() -> FeederData {
        let mut data = FeederData::new();
        for code in ["A", "B", "C"] {
            data.set_dimension(code, "10");
        }
        data.set_machine_info("machineNo", "M-1").unwrap();
        data.set_machine_info("rotation", "Clockwise").unwrap();
        data.set_machine_info("uph", "1200").unwrap();
        data
    }

    #[test]
    fn test_empty_schema_is_filled() {
        let data = FeederData::new();
        assert!(all_dimensions_filled(&data, &DimensionSchema::default()));
        assert!(machine_info_complete(&data, &MachineInfoSchema::new(vec![])));
    }

    #[test]
    fn test_zero_counts_whitespace_does_not() {
        let schema = schema();
        let mut data = filled();

        data.set_dimension("B", "0");
        assert!(all_dimensions_filled(&data, &schema.dimensions));

        data.dimensions.insert("B".to_string(), "   ".to_string());
        assert!(!all_dimensions_filled(&data, &schema.dimensions));
        assert_eq!(first_missing_dimension(&data, &schema.dimensions), Some("B"));
    }

    #[test]
    fn test_first_missing_follows_declaration_order() {
        let schema = schema();
        let mut data = FeederData::new();
        data.set_dimension("A", "1");

        assert_eq!(first_missing_dimension(&data, &schema.dimensions), Some("B"));
        assert_eq!(
            first_missing_field(&data, &schema.machine_info).map(|f| f.id.as_str()),
            Some("machineNo")
        );
    }

    #[test]
    fn test_remark_exempt_and_extra_keys_ignored() {
        let schema = schema();
        let mut data = filled();
        data.set_machine_info("colour", "").unwrap();

        assert!(!data.is_field_set(REMARK_FIELD_ID));
        assert!(machine_info_complete(&data, &schema.machine_info));
        assert!(missing_fields(&data, &schema.machine_info).is_empty());
    }

    #[test]
    fn test_missing_fields_lists_all() {
        let schema = schema();
        let mut data = FeederData::new();
        data.set_machine_info("rotation", "Anti-clockwise").unwrap();

        let ids: Vec<&str> = missing_fields(&data, &schema.machine_info)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["machineNo", "uph"]);
    }

    #[test]
    fn test_check_completeness_order() {
        let schema = schema();
        let mut data = FeederData::new();

        let error = check_completeness(&data, &schema).unwrap_err();
        assert_eq!(error.user_message(), "Dimension A is missing!");
        assert_eq!(error.target(), "A");

        for code in ["A", "B", "C"] {
            data.set_dimension(code, "5");
        }
        data.set_machine_info("machineNo", "M-1").unwrap();
        assert_matches!(
            check_completeness(&data, &schema),
            Err(ValidationError::MissingField { ref id, ref label }) if id == "rotation" && label == "Rotation"
        );

        assert!(check_completeness(&filled(), &schema).is_ok());
    }

    #[test]
    fn test_report() {
        let schema = schema();
        let mut data = FeederData::new();
        data.set_dimension("B", "4");

        let report = CompletenessReport::build(&data, &schema);
        assert_eq!(report.missing_dimensions, vec!["A", "C"]);
        assert_eq!(report.missing_fields, vec!["machineNo", "rotation", "uph"]);
        assert!(!report.is_complete());
        assert!(CompletenessReport::build(&filled(), &schema).is_complete());
    }
}
