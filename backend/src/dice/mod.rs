//! Dice: value domains, face mapping and multisets
//!
//! - **spec**: [`DieSpec`] (uniform or stepped domain) and the [`DieKind`] presets
//! - **multiset**: [`DiceMultiset`], the bounded collection summed together

pub mod multiset;
pub mod spec;

pub use multiset::{DiceMultiset, MAX_DICE};
pub use spec::{DieKind, DieSpec, MAX_SAFE_INTEGER};
