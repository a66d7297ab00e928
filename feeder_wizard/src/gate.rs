//! Page-level gates for the wizard's "Next" and "OK" buttons

use feeder_core::data::FormStore;
use feeder_core::logging::codes;
use feeder_core::schema::FeederSchema;
use feeder_core::validation::{
    all_dimensions_filled, first_missing_dimension, missing_fields, ValidationError,
};
use feeder_core::{log_error, log_success};
use serde::Serialize;

/// Shown when "Next" is pressed with dimensions missing
pub const NOT_COMPLETE_MESSAGE: &str = "Not Complete!";

/// Shown after the page data is cleared
pub const CLEARED_MESSAGE: &str = "Data cleared successfully!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    Complete,
    /// "Next" blocked by at least one missing dimension
    NotComplete,
    MissingDimension {
        code: String,
    },
    /// `focus` is the first empty field; `highlight` lists every empty one
    MissingFields {
        focus: String,
        label: String,
        highlight: Vec<String>,
    },
}

impl GateOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, GateOutcome::Complete)
    }

    pub fn message(&self) -> Option<String> {
        match self {
            GateOutcome::Complete => None,
            GateOutcome::NotComplete => Some(NOT_COMPLETE_MESSAGE.to_string()),
            GateOutcome::MissingDimension { code } => Some(
                ValidationError::MissingDimension { code: code.clone() }.user_message(),
            ),
            GateOutcome::MissingFields { focus, label, .. } => Some(
                ValidationError::MissingField {
                    id: focus.clone(),
                    label: label.clone(),
                }
                .user_message(),
            ),
        }
    }
}

/// "Next" only needs every dimension
pub fn gate_next(store: &FormStore, schema: &FeederSchema) -> GateOutcome {
    let data = store.get(&schema.feeder_type);

    if all_dimensions_filled(data, &schema.dimensions) {
        log_success!(
            codes::success::DIMENSIONS_COMPLETE,
            "All dimensions filled",
            "feeder_type" => &schema.feeder_type
        );
        GateOutcome::Complete
    } else {
        log_error!(
            codes::validation::MISSING_DIMENSION,
            NOT_COMPLETE_MESSAGE,
            "feeder_type" => &schema.feeder_type
        );
        GateOutcome::NotComplete
    }
}

/// "OK" checks dimensions first, then machine info
pub fn gate_ok(store: &FormStore, schema: &FeederSchema) -> GateOutcome {
    let data = store.get(&schema.feeder_type);

    if let Some(code) = first_missing_dimension(data, &schema.dimensions) {
        log_error!(
            codes::validation::MISSING_DIMENSION,
            "Dimension missing",
            "feeder_type" => &schema.feeder_type,
            "code" => code
        );
        return GateOutcome::MissingDimension {
            code: code.to_string(),
        };
    }

    let missing = missing_fields(data, &schema.machine_info);
    if let Some(first) = missing.first() {
        log_error!(
            codes::validation::MISSING_FIELD,
            "Machine info missing",
            "feeder_type" => &schema.feeder_type,
            "field" => &first.id,
            "missing" => missing.len()
        );
        return GateOutcome::MissingFields {
            focus: first.id.clone(),
            label: first.label.clone(),
            highlight: missing.iter().map(|field| field.id.clone()).collect(),
        };
    }

    log_success!(
        codes::success::MACHINE_INFO_COMPLETE,
        "Feeder page complete",
        "feeder_type" => &schema.feeder_type
    );
    GateOutcome::Complete
}

/// "Clear data": reset the page's snapshot and return the user message
pub fn clear_page(store: &mut FormStore, feeder_type: &str) -> &'static str {
    store.clear(feeder_type);
    log_success!(
        codes::success::FEEDER_DATA_CLEARED,
        CLEARED_MESSAGE,
        "feeder_type" => feeder_type
    );
    CLEARED_MESSAGE
}
