//! Machine persistence - tag and component encodings
//!
//! Machines persist through two host formats: a string-keyed compound
//! tag (world saves) and a typed component record (item pickup). Both
//! carry the same fields and must round-trip identically. Missing or
//! malformed fields decode to zero so old saves keep loading.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String keys for persisted machine fields
pub mod keys {
    /// Remaining burn ticks of a combustion machine
    pub const BURN_TIME: &str = "BurnTime";
    /// Total duration of the current burn
    pub const BURN_DURATION: &str = "BurnDuration";
}

/// A string-keyed tag compound in the host's save format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundTag(Map<String, Value>);

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_int(&mut self, key: &str, value: u32) {
        self.0.insert(key.to_string(), Value::from(value));
    }

    /// Read an integer field; missing or non-integer values read as 0
    pub fn get_int(&self, key: &str) -> u32 {
        self.0
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// Typed components persisted on a broken-and-picked-up primitive smelter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmelterComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_duration: Option<u32>,
}
