//! Comparison predicates and percentage formatting
//!
//! A comparison reads "threshold OP sum": `Ge` succeeds when the threshold
//! is at least the rolled sum, `Le` when the sum reaches the threshold.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Default number of decimals in formatted percentages
pub const DEFAULT_PRECISION: u8 = 5;

/// Highest supported number of decimals
pub const MAX_PRECISION: u8 = 20;

/// Placeholder for an undefined probability
pub const UNDEFINED_PERCENT: &str = "--%";

/// Success condition of a threshold against a sum
///
/// # Example
/// ```
/// use dice_odds_core_rs::Comparison;
///
/// assert!(Comparison::Ge.test(7.0, 5));
/// assert!(!Comparison::Lt.test(7.0, 7));
/// assert!(Comparison::Eq.test(7.0, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Comparison {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
}

impl Comparison {
    pub const ALL: [Comparison; 5] = [
        Comparison::Ge,
        Comparison::Le,
        Comparison::Gt,
        Comparison::Lt,
        Comparison::Eq,
    ];

    /// Evaluate `threshold OP sum`
    ///
    /// Sums are exact integers below 2^53 wherever the engine produces them,
    /// so converting to f64 is lossless.
    pub fn test(&self, threshold: f64, sum: u64) -> bool {
        let sum = sum as f64;
        match self {
            Comparison::Ge => threshold >= sum,
            Comparison::Le => threshold <= sum,
            Comparison::Gt => threshold > sum,
            Comparison::Lt => threshold < sum,
            Comparison::Eq => threshold == sum,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Comparison::Ge => "GE",
            Comparison::Le => "LE",
            Comparison::Gt => "GT",
            Comparison::Lt => "LT",
            Comparison::Eq => "EQ",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Lt => "<",
            Comparison::Eq => "=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Comparison {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = s.trim();
        match op {
            ">=" => return Ok(Comparison::Ge),
            "<=" => return Ok(Comparison::Le),
            ">" => return Ok(Comparison::Gt),
            "<" => return Ok(Comparison::Lt),
            "=" | "==" => return Ok(Comparison::Eq),
            _ => {}
        }
        Comparison::ALL
            .iter()
            .copied()
            .find(|cmp| cmp.name().eq_ignore_ascii_case(op))
            .ok_or_else(|| EngineError::Value(format!("Unknown comparison '{}'", s)))
    }
}

/// Format a probability in `[0, 1]` as a percentage string
///
/// Rounds to `precision` decimals (capped at [`MAX_PRECISION`]) with exact
/// ties going away from zero, strips trailing zeros and a dangling decimal
/// point, and appends `%`. `NaN` formats as [`UNDEFINED_PERCENT`].
///
/// # Example
/// ```
/// use dice_odds_core_rs::evaluator::format_percent;
///
/// assert_eq!(format_percent(1.0 / 6.0, 5), "16.66667%");
/// assert_eq!(format_percent(0.5, 5), "50%");
/// assert_eq!(format_percent(0.125, 0), "13%");
/// assert_eq!(format_percent(f64::NAN, 5), "--%");
/// ```
pub fn format_percent(probability: f64, precision: u8) -> String {
    if probability.is_nan() {
        return UNDEFINED_PERCENT.to_string();
    }
    let precision = precision.min(MAX_PRECISION) as usize;
    let mut text = to_fixed(probability * 100.0, precision);
    if text.contains('.') {
        let kept = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(kept);
    }
    text.push('%');
    text
}

/// Fixed-point rendering of the exact binary value of `value`
///
/// Rounds half away from zero. `{:.N}` rounds exact ties to even, which
/// turns 0.390625 into "0.39062" at five decimals.
fn to_fixed(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // value = mantissa * 2^exponent
    let bits = value.abs().to_bits();
    let biased = ((bits >> 52) & 0x7FF) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    let scaled = BigUint::from(mantissa) * BigUint::from(10u32).pow(precision as u32);
    let units = if exponent >= 0 {
        scaled << exponent as usize
    } else {
        // floor(scaled / 2^shift + 1/2)
        let shift = (-exponent) as usize;
        ((scaled << 1usize) + (BigUint::one() << shift)) >> (shift + 1)
    };

    let mut digits = units.to_string();
    if precision > 0 {
        if digits.len() <= precision {
            digits.insert_str(0, &"0".repeat(precision + 1 - digits.len()));
        }
        digits.insert(digits.len() - precision, '.');
    }
    if value.is_sign_negative() && !units.is_zero() {
        digits.insert(0, '-');
    }
    digits
}
