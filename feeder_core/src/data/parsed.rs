use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values recovered from pasted text, keyed by field id and dimension code.
/// Keys the parser found nothing for are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    pub machine_info: BTreeMap<String, String>,
    pub dimensions: BTreeMap<String, String>,
}

impl ParsedConfiguration {
    /// Total number of recovered values
    pub fn len(&self) -> usize {
        self.machine_info.len() + self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machine_info.is_empty() && self.dimensions.is_empty()
    }
}
