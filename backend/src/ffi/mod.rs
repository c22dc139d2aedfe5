//! Python bindings via PyO3
//!
//! Exposes [`crate::DiceEngine`] as the `DiceEngine` Python class.

pub mod engine;
