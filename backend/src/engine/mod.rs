//! Engine facade - generator, dice and probability table for one roll group
//!
//! See `dice_engine.rs` for the implementation. `sheet.rs` combines several
//! groups into one sheet with a joint chance and verdict.

pub mod checkpoint;
pub mod config;
pub mod dice_engine;
pub mod sheet;

pub use checkpoint::{compute_config_hash, EngineSnapshot};
pub use config::EngineConfig;
pub use dice_engine::{DiceEngine, RollOutcome};
pub use sheet::{DiceSheet, RollGroup, Verdict, MAX_GROUPS};
