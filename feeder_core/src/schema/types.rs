//! Dimension and machine-info schema types

use serde::{Deserialize, Serialize};

/// Id of the optional free-text field exempt from completeness checks
pub const REMARK_FIELD_ID: &str = "remark";

/// One measurable feeder parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub code: String,
    pub description: String,
}

impl DimensionSpec {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Dimension codes in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionSchema {
    specs: Vec<DimensionSpec>,
}

impl DimensionSchema {
    pub fn new(specs: Vec<DimensionSpec>) -> Self {
        Self { specs }
    }

    /// Build from `(code, description)` pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(code, description)| DimensionSpec::new(*code, *description))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &DimensionSpec> {
        self.specs.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.code.as_str())
    }

    pub fn get(&self, code: &str) -> Option<&DimensionSpec> {
        self.specs.iter().find(|spec| spec.code == code)
    }

    pub fn description(&self, code: &str) -> Option<&str> {
        self.get(code).map(|spec| spec.description.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Input kind of a machine-info field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Number,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Select => "select",
            FieldType::Number => "number",
        }
    }
}

/// A named, typed machine-info input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineInfoField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl MachineInfoField {
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type: FieldType::Text,
            options: None,
        }
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type: FieldType::Number,
            options: None,
        }
    }

    pub fn select(id: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type: FieldType::Select,
            options: Some(options.iter().map(|o| o.to_string()).collect()),
        }
    }

    /// Whether completeness checks skip this field
    pub fn is_exempt(&self) -> bool {
        self.id == REMARK_FIELD_ID
    }
}

/// Machine-info fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineInfoSchema {
    fields: Vec<MachineInfoField>,
}

impl MachineInfoSchema {
    pub fn new(fields: Vec<MachineInfoField>) -> Self {
        Self { fields }
    }

    /// The field list every feeder page uses unless it declares its own
    pub fn standard() -> Self {
        Self::new(vec![
            MachineInfoField::text("machineNo", "Machine no."),
            MachineInfoField::select("rotation", "Rotation", &["Clockwise", "Anti-clockwise"]),
            MachineInfoField::number("uph", "UPH"),
            MachineInfoField::text(REMARK_FIELD_ID, "Remark"),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MachineInfoField> {
        self.fields.iter()
    }

    /// Fields that take part in completeness checks, in declaration order
    pub fn required(&self) -> impl Iterator<Item = &MachineInfoField> {
        self.fields.iter().filter(|field| !field.is_exempt())
    }

    pub fn get(&self, id: &str) -> Option<&MachineInfoField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for MachineInfoSchema {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything a feeder page declares about its inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeederSchema {
    pub feeder_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub dimensions: DimensionSchema,
    #[serde(default)]
    pub machine_info: MachineInfoSchema,
}

impl FeederSchema {
    pub fn new(feeder_type: impl Into<String>, dimensions: DimensionSchema) -> Self {
        Self {
            feeder_type: feeder_type.into(),
            title: String::new(),
            dimensions,
            machine_info: MachineInfoSchema::standard(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_machine_info(mut self, machine_info: MachineInfoSchema) -> Self {
        self.machine_info = machine_info;
        self
    }

    /// Title for documents, falling back to the feeder type
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.feeder_type
        } else {
            &self.title
        }
    }
}
