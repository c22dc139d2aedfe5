//! Dice Odds Core - Rust Engine
//!
//! Deterministic dice rolling and exact sum probabilities for a dice sheet.
//!
//! # Architecture
//!
//! - **rng**: Seed expansion and the sfc32 generator
//! - **dice**: Die value domains, face mapping, multisets
//! - **distribution**: Exact sum histograms by convolution
//! - **evaluator**: Comparison predicates and percentage formatting
//! - **engine**: Facade owning one generator and one table; sheets of roll groups
//! - **events**: Event log of engine activity
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, one owner per generator)
//! 2. Combination counts are exact (`total == Π faces`)
//! 3. Probability queries never fail; undefined answers are `NaN`

// Module declarations
pub mod dice;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod rng;

// Re-exports for convenience
pub use dice::{DiceMultiset, DieKind, DieSpec, MAX_DICE};
pub use distribution::{DistributionTable, ProbabilityTable};
pub use engine::{
    DiceEngine, DiceSheet, EngineConfig, EngineSnapshot, RollGroup, RollOutcome, Verdict,
    MAX_GROUPS,
};
pub use error::{EngineError, EngineResult};
pub use evaluator::{format_percent, Comparison};
pub use events::{EngineEvent, EventLog};
pub use rng::{RngState, SeededRng};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn dice_odds_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::engine::PyDiceEngine>()?;
    Ok(())
}
