//! Session form store keyed by feeder type

use super::snapshot::FeederData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static EMPTY: FeederData = FeederData::new();

/// Owned by the caller and passed to whatever needs the entered data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormStore {
    feeders: BTreeMap<String, FeederData>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for `feeder_type`, or an empty one if never visited
    pub fn get(&self, feeder_type: &str) -> &FeederData {
        self.feeders.get(feeder_type).unwrap_or(&EMPTY)
    }

    /// Mutable snapshot, created empty on first access
    pub fn entry(&mut self, feeder_type: &str) -> &mut FeederData {
        self.feeders.entry(feeder_type.to_string()).or_default()
    }

    pub fn contains(&self, feeder_type: &str) -> bool {
        self.feeders.contains_key(feeder_type)
    }

    /// Replace the snapshot for `feeder_type`
    pub fn insert(&mut self, feeder_type: &str, data: FeederData) {
        self.feeders.insert(feeder_type.to_string(), data);
    }

    /// Reset the snapshot for `feeder_type` to empty
    pub fn clear(&mut self, feeder_type: &str) {
        if let Some(data) = self.feeders.get_mut(feeder_type) {
            data.clear();
        }
    }

    pub fn feeder_types(&self) -> impl Iterator<Item = &str> {
        self.feeders.keys().map(String::as_str)
    }
}
