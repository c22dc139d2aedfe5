//! Fast paths that answer a probability query without a full table
//!
//! - Thresholds outside `[min_sum, max_sum]` resolve to 0 or 1 by predicate.
//! - A single die has a closed form: count the satisfying faces.

use crate::dice::multiset::{max_sum, min_sum};
use crate::dice::DieSpec;
use crate::evaluator::Comparison;

/// Probability when `threshold` lies strictly outside `[min, max]`
///
/// Returns `None` when the threshold is inside the range and the full
/// distribution is needed.
pub fn outside_range(min: u64, max: u64, threshold: f64, cmp: Comparison) -> Option<f64> {
    // Every sum exceeds the threshold
    if threshold < min as f64 {
        return Some(match cmp {
            Comparison::Le | Comparison::Lt => 1.0,
            Comparison::Ge | Comparison::Gt | Comparison::Eq => 0.0,
        });
    }
    // Every sum is below the threshold
    if threshold > max as f64 {
        return Some(match cmp {
            Comparison::Ge | Comparison::Gt => 1.0,
            Comparison::Le | Comparison::Lt | Comparison::Eq => 0.0,
        });
    }
    None
}

/// Exact probability for one die
///
/// # Example
/// ```
/// use dice_odds_core_rs::distribution::quick::single_die;
/// use dice_odds_core_rs::{Comparison, DieKind};
///
/// // 4 >= face holds for faces 1..=4 of a d6
/// assert_eq!(single_die(&DieKind::D6.spec(), 4.0, Comparison::Ge), 4.0 / 6.0);
/// ```
pub fn single_die(die: &DieSpec, threshold: f64, cmp: Comparison) -> f64 {
    if !threshold.is_finite() {
        return f64::NAN;
    }
    let faces = die.faces();
    let at_most = faces_at_most(die, threshold);
    let exact = u64::from(is_face(die, threshold));
    let below = at_most - exact;

    let hits = match cmp {
        Comparison::Ge => at_most,
        Comparison::Gt => below,
        Comparison::Le => faces - below,
        Comparison::Lt => faces - at_most,
        Comparison::Eq => exact,
    };
    hits as f64 / faces as f64
}

/// Answer from the fast paths alone, or `None` if a table is required
///
/// Non-finite thresholds and empty dice lists yield `Some(NaN)`.
pub fn quick_probability(dice: &[DieSpec], threshold: f64, cmp: Comparison) -> Option<f64> {
    if !threshold.is_finite() || dice.is_empty() {
        return Some(f64::NAN);
    }
    if let Some(p) = outside_range(min_sum(dice), max_sum(dice), threshold, cmp) {
        return Some(p);
    }
    match dice {
        [die] => Some(single_die(die, threshold, cmp)),
        _ => None,
    }
}

/// Number of faces `<= x`
fn faces_at_most(die: &DieSpec, x: f64) -> u64 {
    let index = (x / die.step() as f64).floor();
    if index <= 0.0 {
        0
    } else if index >= die.faces() as f64 {
        die.faces()
    } else {
        index as u64
    }
}

fn is_face(die: &DieSpec, x: f64) -> bool {
    x.fract() == 0.0 && x >= 0.0 && x <= die.max() as f64 && die.has_face(x as u64)
}
