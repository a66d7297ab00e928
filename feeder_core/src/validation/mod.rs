//! Completeness validation with logging

pub mod completeness;
pub mod error;

pub use completeness::{
    all_dimensions_filled, check_completeness, first_missing_dimension, first_missing_field,
    machine_info_complete, missing_fields, CompletenessReport,
};
pub use error::{ValidationError, ValidationResult};

use crate::data::FeederData;
use crate::logging::codes;
use crate::schema::FeederSchema;
use crate::{log_error, log_success};

/// [`check_completeness`] with the outcome logged
pub fn validate_feeder(data: &FeederData, schema: &FeederSchema) -> ValidationResult<()> {
    match check_completeness(data, schema) {
        Ok(()) => {
            log_success!(
                codes::success::MACHINE_INFO_COMPLETE,
                "Feeder data complete",
                "feeder_type" => &schema.feeder_type
            );
            Ok(())
        }
        Err(e) => {
            log_error!(
                e.error_code(),
                &e.user_message(),
                "feeder_type" => &schema.feeder_type,
                "target" => e.target()
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DimensionSchema;
    use assert_matches::assert_matches;

    fn schema() -> FeederSchema {
        FeederSchema::new("bowl", DimensionSchema::from_pairs(&[("A", "Bowl Diameter")]))
    }

    #[test]
    fn test_validate_feeder_reports_first_gap() {
        let mut data = FeederData::new();
        assert_matches!(
            validate_feeder(&data, &schema()),
            Err(ValidationError::MissingDimension { code }) if code == "A"
        );

        data.set_dimension("A", "0");
        assert_matches!(
            validate_feeder(&data, &schema()),
            Err(ValidationError::MissingField { id, .. }) if id == "machineNo"
        );
    }

    #[test]
    fn test_validate_feeder_accepts_complete_data() {
        let mut data = FeederData::new();
        data.set_dimension("A", "300");
        data.set_machine_info("machineNo", "M-1").unwrap();
        data.set_machine_info("rotation", "Clockwise").unwrap();
        data.set_machine_info("uph", "600").unwrap();

        assert_eq!(validate_feeder(&data, &schema()), Ok(()));
    }
}
