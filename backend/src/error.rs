//! Engine error types
//!
//! Construction-time validation is strict and reported through
//! [`EngineError`]. Probability queries never fail; they return `NaN`.

use thiserror::Error;

/// Errors raised while building engine inputs or state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A value of the wrong type crossed a dynamic boundary (e.g. a numeric seed)
    #[error("Type error: {0}")]
    Type(String),

    /// A die parameter is non-positive, fractional, or out of range
    #[error("Value error: {0}")]
    Value(String),

    #[error("Too many dice: {got} exceeds the limit of {max}")]
    TooManyDice { max: usize, got: usize },

    #[error("No die at index {index} (multiset holds {len})")]
    DieIndexOutOfRange { index: usize, len: usize },

    #[error("Too many roll groups: the sheet holds at most {max}")]
    TooManyGroups { max: usize },

    #[error("No roll group at index {index} (sheet holds {len})")]
    GroupIndexOutOfRange { index: usize, len: usize },

    #[error("Distribution table of {len} entries exceeds the limit of {limit}")]
    TableTooLarge { len: u64, limit: u64 },

    #[error("Brute-force enumeration of {combinations} combinations exceeds the limit of {limit}")]
    EnumerationTooLarge { combinations: String, limit: u64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
