//! Per-feeder snapshot of entered values

use super::error::{FieldError, FieldResult};
use super::parsed::ParsedConfiguration;
use crate::config::compile_time::fields::REMARK_MAX_CHARS;
use crate::schema::{DimensionSchema, MachineInfoSchema, REMARK_FIELD_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An entry counts as set when present and non-empty after trimming
pub fn is_value_set(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Dimension and machine-info values entered for one feeder type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeederData {
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
    #[serde(default)]
    pub machine_info: BTreeMap<String, String>,
}

impl FeederData {
    pub const fn new() -> Self {
        Self {
            dimensions: BTreeMap::new(),
            machine_info: BTreeMap::new(),
        }
    }

    pub fn dimension(&self, code: &str) -> Option<&str> {
        self.dimensions.get(code).map(String::as_str)
    }

    pub fn machine_info_value(&self, id: &str) -> Option<&str> {
        self.machine_info.get(id).map(String::as_str)
    }

    pub fn is_dimension_set(&self, code: &str) -> bool {
        is_value_set(self.dimensions.get(code))
    }

    pub fn is_field_set(&self, id: &str) -> bool {
        is_value_set(self.machine_info.get(id))
    }

    /// Store a trimmed dimension value; blank input leaves the code unset
    pub fn set_dimension(&mut self, code: &str, value: &str) {
        self.dimensions
            .insert(code.to_string(), value.trim().to_string());
    }

    /// Store a machine-info value, enforcing the remark length limit
    pub fn set_machine_info(&mut self, id: &str, value: &str) -> FieldResult<()> {
        if id == REMARK_FIELD_ID {
            let length = value.chars().count();
            if length > REMARK_MAX_CHARS {
                return Err(FieldError::RemarkTooLong {
                    length,
                    max: REMARK_MAX_CHARS,
                });
            }
        }

        self.machine_info.insert(id.to_string(), value.to_string());
        Ok(())
    }

    /// Set a dimension declared by `schema`
    pub fn edit_dimension(
        &mut self,
        schema: &DimensionSchema,
        code: &str,
        value: &str,
    ) -> FieldResult<()> {
        if !schema.contains(code) {
            return Err(FieldError::UnknownDimension {
                code: code.to_string(),
            });
        }
        self.set_dimension(code, value);
        Ok(())
    }

    /// Set a machine-info field declared by `schema`
    pub fn edit_machine_info(
        &mut self,
        schema: &MachineInfoSchema,
        id: &str,
        value: &str,
    ) -> FieldResult<()> {
        if schema.get(id).is_none() {
            return Err(FieldError::UnknownField { id: id.to_string() });
        }
        self.set_machine_info(id, value)
    }

    pub fn clear(&mut self) {
        self.dimensions.clear();
        self.machine_info.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.machine_info.is_empty()
    }

    /// Copy every parsed key over the current values; keys not parsed keep theirs.
    /// A parsed remark is cut to `REMARK_MAX_CHARS`. Returns the number of keys
    /// written.
    pub fn overlay(&mut self, parsed: &ParsedConfiguration) -> usize {
        for (code, value) in &parsed.dimensions {
            self.dimensions.insert(code.clone(), value.clone());
        }
        for (id, value) in &parsed.machine_info {
            let value = if id == REMARK_FIELD_ID {
                value.chars().take(REMARK_MAX_CHARS).collect()
            } else {
                value.clone()
            };
            self.machine_info.insert(id.clone(), value);
        }
        parsed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DimensionSchema, MachineInfoSchema};
    use assert_matches::assert_matches;

    #[test]
    fn test_set_semantics() {
        let mut data = FeederData::new();
        data.set_dimension("A", "  ");
        data.set_dimension("B", "0");
        data.set_dimension("C", " 120 ");

        assert!(!data.is_dimension_set("A"));
        assert!(data.is_dimension_set("B"));
        assert_eq!(data.dimension("C"), Some("120"));
        assert!(!data.is_dimension_set("D"));
    }

    #[test]
    fn test_remark_limit() {
        let mut data = FeederData::new();
        let at_limit = "r".repeat(REMARK_MAX_CHARS);

        assert!(data.set_machine_info(REMARK_FIELD_ID, &at_limit).is_ok());
        assert_matches!(
            data.set_machine_info(REMARK_FIELD_ID, &format!("{}r", at_limit)),
            Err(FieldError::RemarkTooLong { length, .. }) if length == REMARK_MAX_CHARS + 1
        );
        assert_eq!(data.machine_info_value(REMARK_FIELD_ID), Some(at_limit.as_str()));

        // other text fields carry no limit
        assert!(data.set_machine_info("machineNo", &"m".repeat(200)).is_ok());
    }

    #[test]
    fn test_schema_checked_edits() {
        let mut data = FeederData::new();
        let dimensions = DimensionSchema::from_pairs(&[("A", "Bowl Diameter")]);
        let fields = MachineInfoSchema::standard();

        assert!(data.edit_dimension(&dimensions, "A", "300").is_ok());
        assert_matches!(
            data.edit_dimension(&dimensions, "Z", "1"),
            Err(FieldError::UnknownDimension { .. })
        );
        assert!(data.edit_machine_info(&fields, "uph", "1200").is_ok());
        assert_matches!(
            data.edit_machine_info(&fields, "colour", "red"),
            Err(FieldError::UnknownField { .. })
        );
    }

    #[test]
    fn test_overlay_keeps_unparsed_keys() {
        let mut data = FeederData::new();
        data.set_dimension("A", "100");
        data.set_dimension("B", "200");
        data.set_machine_info("uph", "900").unwrap();

        let mut parsed = ParsedConfiguration::default();
        parsed.dimensions.insert("A".to_string(), "150".to_string());
        parsed
            .machine_info
            .insert("machineNo".to_string(), "M-7".to_string());

        assert_eq!(data.overlay(&parsed), 2);
        assert_eq!(data.dimension("A"), Some("150"));
        assert_eq!(data.dimension("B"), Some("200"));
        assert_eq!(data.machine_info_value("uph"), Some("900"));
        assert_eq!(data.machine_info_value("machineNo"), Some("M-7"));
    }

    #[test]
    fn test_clear_and_json_shape() {
        let mut data = FeederData::new();
        data.set_dimension("A", "1");
        data.set_machine_info("uph", "2").unwrap();

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["dimensions"]["A"], "1");
        assert_eq!(json["machineInfo"]["uph"], "2");

        data.clear();
        assert!(data.is_empty());
    }

    #[test]
    fn test_overlay_cuts_long_remark() {
        let mut parsed = ParsedConfiguration::default();
        parsed.machine_info.insert(REMARK_FIELD_ID.to_string(), "x".repeat(100));
        parsed.machine_info.insert("uph".to_string(), "9".repeat(100));

        let mut data = FeederData::new();
        assert_eq!(data.overlay(&parsed), 2);

        let remark = data.machine_info_value(REMARK_FIELD_ID).unwrap();
        assert_eq!(remark.chars().count(), REMARK_MAX_CHARS);
        assert_eq!(data.machine_info_value("uph").map(str::len), Some(100));
    }
}
