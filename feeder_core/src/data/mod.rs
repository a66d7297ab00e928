//! Entered feeder data and parsed preview results

pub mod error;
pub mod parsed;
pub mod snapshot;
pub mod store;

pub use error::{FieldError, FieldResult};
pub use parsed::ParsedConfiguration;
pub use snapshot::{is_value_set, FeederData};
pub use store::FormStore;
