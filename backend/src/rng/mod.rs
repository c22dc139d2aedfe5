//! Deterministic random number generation
//!
//! Seed strings are expanded to 128 bits with a MurmurHash3-style mixer and
//! drive an sfc32 generator producing 32-bit draws.
//! CRITICAL: All dice rolls in the engine MUST go through this module.

mod murmur;
mod sfc32;

pub use murmur::expand_seed;
pub use sfc32::{RngState, SeededRng};
pub(crate) use sfc32::time_seed;
