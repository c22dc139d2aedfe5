//! Exact histogram of dice sums
//!
//! # Algorithm
//!
//! Dynamic-programming convolution over two alternating count buffers
//! indexed by partial sum. Each die folds every reachable partial sum with
//! every one of its faces into the other buffer; the buffers then swap and
//! the stale one is cleared. Cost is `O(dice × max_sum × faces)`, against
//! `O(Π faces)` for enumerating combinations.
//!
//! # Critical Invariants
//!
//! 1. **Exactness**: counts are arbitrary-precision integers
//! 2. **Conservation**: `total == Π faces_i`
//! 3. **Immutability**: a built table never changes; rebuilding makes a new one

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::quick;
use crate::dice::multiset::{max_sum, min_sum};
use crate::dice::DieSpec;
use crate::error::{EngineError, EngineResult};
use crate::evaluator::Comparison;

/// Default limit on convolution buffer length (highest sum + 1)
pub const DEFAULT_MAX_TABLE_LEN: u64 = 1 << 20;

/// Mapping from each achievable sum to its number of face combinations
///
/// # Example
/// ```
/// use dice_odds_core_rs::{Comparison, DieKind, DistributionTable};
///
/// let d6 = DieKind::D6.spec();
/// let table = DistributionTable::build(&[d6, d6]).unwrap();
/// assert_eq!(table.total().to_string(), "36");
/// assert_eq!(table.count(7).to_string(), "6");
/// assert_eq!(table.check(7.0, Comparison::Eq), 1.0 / 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionTable {
    dice: Vec<DieSpec>,
    /// Achievable sums in ascending order, each with a non-zero count
    counts: Vec<(u64, BigUint)>,
    total: BigUint,
    min_sum: u64,
    max_sum: u64,
}

impl DistributionTable {
    /// Table for no dice; every query against it is `NaN`
    pub fn empty() -> Self {
        Self {
            dice: Vec::new(),
            counts: Vec::new(),
            total: BigUint::zero(),
            min_sum: 0,
            max_sum: 0,
        }
    }

    /// Build with the default buffer limit
    pub fn build(dice: &[DieSpec]) -> EngineResult<Self> {
        Self::build_with_limit(dice, DEFAULT_MAX_TABLE_LEN)
    }

    /// Convolve `dice` into a table
    ///
    /// # Errors
    /// `EngineError::TableTooLarge` if the highest sum + 1 exceeds `max_len`.
    pub fn build_with_limit(dice: &[DieSpec], max_len: u64) -> EngineResult<Self> {
        if dice.is_empty() {
            return Ok(Self::empty());
        }

        let highest = max_sum(dice);
        let len = highest + 1;
        if len > max_len {
            return Err(EngineError::TableTooLarge {
                len,
                limit: max_len,
            });
        }
        let len = len as usize;

        let mut buffers = [vec![BigUint::zero(); len], vec![BigUint::zero(); len]];
        buffers[0][0] = BigUint::one();

        // Highest partial sum reachable so far
        let mut reach: usize = 0;

        for (i, die) in dice.iter().enumerate() {
            let (lo, hi) = buffers.split_at_mut(1);
            let (current, next) = if i % 2 == 0 {
                (&mut lo[0], &mut hi[0])
            } else {
                (&mut hi[0], &mut lo[0])
            };

            for sum in 0..=reach {
                let count = &current[sum];
                if count.is_zero() {
                    continue;
                }
                for face in die.face_values() {
                    next[sum + face as usize] += count;
                }
            }

            for slot in current[..=reach].iter_mut() {
                slot.set_zero();
            }
            reach += die.max() as usize;
        }

        let last = &buffers[dice.len() % 2];
        let counts: Vec<(u64, BigUint)> = last
            .iter()
            .enumerate()
            .filter(|(_, count)| !count.is_zero())
            .map(|(sum, count)| (sum as u64, count.clone()))
            .collect();

        Ok(Self::from_counts(dice, counts))
    }

    /// Assemble a table from ascending `(sum, count)` pairs with non-zero counts
    pub(crate) fn from_counts(dice: &[DieSpec], counts: Vec<(u64, BigUint)>) -> Self {
        if dice.is_empty() {
            return Self::empty();
        }
        let total = counts.iter().map(|(_, count)| count).sum();
        Self {
            dice: dice.to_vec(),
            counts,
            total,
            min_sum: min_sum(dice),
            max_sum: max_sum(dice),
        }
    }

    pub(crate) fn from_map(dice: &[DieSpec], map: BTreeMap<u64, BigUint>) -> Self {
        Self::from_counts(dice, map.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Dice this table was built from, in build order
    pub fn dice(&self) -> &[DieSpec] {
        &self.dice
    }

    /// Number of distinct achievable sums
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// `(sum, count)` pairs in ascending sum order
    pub fn counts(&self) -> &[(u64, BigUint)] {
        &self.counts
    }

    /// Combinations producing `sum` (zero when unreachable)
    pub fn count(&self, sum: u64) -> BigUint {
        self.counts
            .binary_search_by_key(&sum, |(s, _)| *s)
            .map(|idx| self.counts[idx].1.clone())
            .unwrap_or_default()
    }

    /// Total number of face combinations
    pub fn total(&self) -> &BigUint {
        &self.total
    }

    pub fn min_sum(&self) -> u64 {
        self.min_sum
    }

    pub fn max_sum(&self) -> u64 {
        self.max_sum
    }

    /// Probability that a roll sums to exactly `sum`
    pub fn probability_of(&self, sum: u64) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        ratio(&self.count(sum), &self.total)
    }

    /// Probability that `threshold OP sum` holds for a roll of these dice
    ///
    /// `NaN` when the threshold is not finite or the table is empty.
    pub fn check(&self, threshold: f64, cmp: Comparison) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        if let Some(p) = quick::quick_probability(&self.dice, threshold, cmp) {
            return p;
        }

        let hits: BigUint = self
            .counts
            .iter()
            .filter(|(sum, _)| cmp.test(threshold, *sum))
            .map(|(_, count)| count)
            .sum();
        ratio(&hits, &self.total)
    }

    /// SHA-256 over the `(sum, count)` content, hex encoded
    ///
    /// Two tables with the same histogram share a fingerprint regardless of
    /// the order their dice were given in.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (sum, count) in &self.counts {
            let bytes = count.to_bytes_le();
            hasher.update(sum.to_le_bytes());
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        format!("{:x}", hasher.finalize())
    }
}

impl Default for DistributionTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// `num / den` as f64, scaling both down first so huge counts stay finite
pub(crate) fn ratio(num: &BigUint, den: &BigUint) -> f64 {
    const KEEP_BITS: u64 = 960;
    let shift = den.bits().saturating_sub(KEEP_BITS);
    let num = (num >> shift).to_f64().unwrap_or(f64::NAN);
    let den = (den >> shift).to_f64().unwrap_or(f64::NAN);
    num / den
}
