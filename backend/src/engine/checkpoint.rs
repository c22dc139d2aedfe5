//! Checkpoint - Save/Load Engine State
//!
//! A snapshot captures the generator lanes and the dice multiset. The
//! distribution table is not stored; it is rebuilt on restore, which yields a
//! content-identical table.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored engine continues the exact draw sequence
//! - **Config Matching**: state can only be loaded with a matching config

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dice::DieSpec;
use crate::error::{EngineError, EngineResult};
use crate::rng::RngState;

/// Complete engine state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Generator lanes at time of snapshot (CRITICAL for determinism)
    pub rng_state: RngState,

    /// Dice multiset in host order
    pub dice: Vec<DieSpec>,

    /// SHA256 hash of the engine config (for validation)
    pub config_hash: String,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string(self)
            .map_err(|e| EngineError::Checkpoint(format!("Snapshot serialization failed: {}", e)))
    }

    /// Parse a snapshot; dice are validated as they are read
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::Checkpoint(format!("Snapshot deserialization failed: {}", e)))
    }
}

/// Compute deterministic SHA256 hash of config
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> EngineResult<String> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| EngineError::Checkpoint(format!("Config serialization failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| EngineError::Checkpoint(format!("Config serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
