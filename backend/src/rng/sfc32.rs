//! sfc32 random number generator
//!
//! Small Fast Counting generator with 128 bits of state, producing uniform
//! 32-bit unsigned draws. Statistical quality only, NOT cryptographic.
//!
//! # Determinism
//!
//! Same seed string → same sequence of draws. This is CRITICAL for:
//! - Testing (fixed fixtures per seed)
//! - Checkpointing (resume an engine mid-sequence)
//! - Sharing (two sheets with the same seed roll the same faces)

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::murmur::expand_seed;

/// The four 32-bit lanes of generator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RngState {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

/// Deterministic random number generator seeded by a string
///
/// # Example
/// ```
/// use dice_odds_core_rs::SeededRng;
///
/// let mut rng = SeededRng::new("seed");
/// let draw = rng.next_u32();
/// assert_eq!(draw, 3_423_392_289);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRng {
    state: RngState,
}

impl SeededRng {
    /// Create a new RNG from a seed string
    ///
    /// Any string is accepted, including the empty string.
    pub fn new(seed: &str) -> Self {
        Self {
            state: expand_seed(seed),
        }
    }

    /// Create a new RNG seeded from the current time
    ///
    /// The seed string is the current UTC time in milliseconds, formatted as
    /// lowercase hex.
    pub fn from_time() -> Self {
        Self::new(&time_seed())
    }

    /// Create from an optional seed, falling back to [`SeededRng::from_time`]
    pub fn from_optional(seed: Option<&str>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_time(),
        }
    }

    /// Recreate an RNG at an exact point in its sequence
    ///
    /// # Example
    /// ```
    /// use dice_odds_core_rs::SeededRng;
    ///
    /// let mut rng = SeededRng::new("checkpoint");
    /// rng.next_u32();
    /// let mut resumed = SeededRng::from_state(rng.state());
    /// assert_eq!(rng.next_u32(), resumed.next_u32());
    /// ```
    pub fn from_state(state: RngState) -> Self {
        Self { state }
    }

    /// Current generator state (for checkpointing/replay)
    pub fn state(&self) -> RngState {
        self.state
    }

    /// Generate the next 32-bit draw
    ///
    /// This advances the internal state and returns the drawn value.
    pub fn next_u32(&mut self) -> u32 {
        let RngState { a, b, c, d } = self.state;

        let v = a.wrapping_add(b).wrapping_add(d);
        self.state = RngState {
            a: b ^ (b >> 9),
            b: c.wrapping_add(c << 3),
            c: c.rotate_left(21).wrapping_add(v),
            d: d.wrapping_add(1),
        };
        v
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use dice_odds_core_rs::SeededRng;
    ///
    /// let mut rng = SeededRng::new("unit");
    /// let p = rng.next_f64();
    /// assert!(p >= 0.0 && p < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Hex-formatted UTC milliseconds, the default seed string
pub(crate) fn time_seed() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{:x}", millis)
}
