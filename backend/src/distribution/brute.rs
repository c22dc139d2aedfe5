//! Reference enumeration of every face combination
//!
//! Walks face indices like an odometer, one combination at a time. The cost
//! is the product of face counts, so it only serves small multisets and as
//! an independent check on the convolution.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

use super::DistributionTable;
use crate::dice::multiset::combinations;
use crate::dice::DieSpec;
use crate::error::{EngineError, EngineResult};

/// Default combination limit for [`enumerate`]
pub const DEFAULT_ENUMERATION_LIMIT: u64 = 1_000_000;

/// Build a table by enumerating all face combinations
///
/// # Errors
/// `EngineError::EnumerationTooLarge` when the number of combinations
/// exceeds `limit`.
///
/// # Example
/// ```
/// use dice_odds_core_rs::distribution::brute::enumerate;
/// use dice_odds_core_rs::{DieKind, DistributionTable};
///
/// let dice = [DieKind::D4.spec(), DieKind::D6.spec()];
/// let brute = enumerate(&dice, 1_000).unwrap();
/// assert_eq!(brute, DistributionTable::build(&dice).unwrap());
/// ```
pub fn enumerate(dice: &[DieSpec], limit: u64) -> EngineResult<DistributionTable> {
    if dice.is_empty() {
        return Ok(DistributionTable::empty());
    }

    let total = combinations(dice);
    let within_limit = total.to_u64().map(|n| n <= limit).unwrap_or(false);
    if !within_limit {
        return Err(EngineError::EnumerationTooLarge {
            combinations: total.to_string(),
            limit,
        });
    }

    let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
    let mut indices = vec![0u64; dice.len()];

    'odometer: loop {
        let sum: u64 = dice
            .iter()
            .zip(&indices)
            .map(|(die, &i)| die.step() * (i + 1))
            .sum();
        *counts.entry(sum).or_insert(0) += 1;

        for (slot, die) in indices.iter_mut().zip(dice) {
            *slot += 1;
            if *slot < die.faces() {
                continue 'odometer;
            }
            *slot = 0;
        }
        break;
    }

    let counts = counts
        .into_iter()
        .map(|(sum, count)| (sum, BigUint::from(count)))
        .collect();
    Ok(DistributionTable::from_map(dice, counts))
}
