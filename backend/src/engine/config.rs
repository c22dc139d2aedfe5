//! Engine configuration
//!
//! Every field has a default, so `{}` is a complete configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dice::MAX_DICE;
use crate::distribution::DEFAULT_MAX_TABLE_LEN;
use crate::error::{EngineError, EngineResult};
use crate::evaluator::{DEFAULT_PRECISION, MAX_PRECISION};

/// Configuration for a [`crate::DiceEngine`]
///
/// # Example
/// ```
/// use dice_odds_core_rs::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{"seed": "table-7", "print_precision": 2}"#).unwrap();
/// assert_eq!(config.seed.as_deref(), Some("table-7"));
/// assert_eq!(config.max_dice, 48);
///
/// // A numeric seed is a type error, not a value error
/// assert!(EngineConfig::from_json(r#"{"seed": 42}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed string; `None` derives one from the current time
    pub seed: Option<String>,

    /// Maximum dice in the multiset (1..=48)
    pub max_dice: usize,

    /// Decimals in formatted percentages (0..=20)
    pub print_precision: u8,

    /// Upper bound on the convolution buffer (highest sum + 1)
    pub max_table_len: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_dice: MAX_DICE,
            print_precision: DEFAULT_PRECISION,
            max_table_len: DEFAULT_MAX_TABLE_LEN,
        }
    }
}

impl EngineConfig {
    /// Default configuration with a fixed seed
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: Some(seed.into()),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    /// - `EngineError::Type` if `seed` is present but not a string
    /// - `EngineError::InvalidConfig` for malformed JSON or out-of-range fields
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(format!("Malformed config JSON: {}", e)))?;

        if let Some(seed) = value.get("seed") {
            if !(seed.is_string() || seed.is_null()) {
                return Err(EngineError::Type(format!(
                    "seed is not a string: {}",
                    seed
                )));
            }
        }

        let config: EngineConfig = serde_json::from_value(value)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.max_dice == 0 || self.max_dice > MAX_DICE {
            return Err(EngineError::InvalidConfig(format!(
                "max_dice must be in 1..={}, got {}",
                MAX_DICE, self.max_dice
            )));
        }
        if self.print_precision > MAX_PRECISION {
            return Err(EngineError::InvalidConfig(format!(
                "print_precision must be in 0..={}, got {}",
                MAX_PRECISION, self.print_precision
            )));
        }
        if self.max_table_len == 0 {
            return Err(EngineError::InvalidConfig(
                "max_table_len must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
