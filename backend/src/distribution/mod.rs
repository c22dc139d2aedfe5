//! Exact probability of dice sums
//!
//! - **table**: [`DistributionTable`], the convolution-built histogram
//! - **quick**: range short-circuits and the single-die closed form
//! - **brute**: reference enumeration for small multisets
//!
//! [`ProbabilityTable`] holds the current table for a changing multiset and
//! swaps in a fully built replacement on every [`ProbabilityTable::setup`].

pub mod brute;
pub mod quick;
pub mod table;

pub use table::{DistributionTable, DEFAULT_MAX_TABLE_LEN};

use crate::dice::DieSpec;
use crate::error::EngineResult;
use crate::evaluator::Comparison;

/// Holder of the current distribution table
///
/// # Example
/// ```
/// use dice_odds_core_rs::{Comparison, DieKind, ProbabilityTable};
///
/// let mut probability = ProbabilityTable::new();
/// assert!(probability.check(3.0, Comparison::Ge).is_nan());
///
/// probability.setup(&[DieKind::D6.spec()]).unwrap();
/// assert_eq!(probability.check(3.0, Comparison::Ge), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    table: DistributionTable,
    max_table_len: u64,
}

impl ProbabilityTable {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_TABLE_LEN)
    }

    pub fn with_limit(max_table_len: u64) -> Self {
        Self {
            table: DistributionTable::empty(),
            max_table_len,
        }
    }

    /// Replace the table with one built from `dice`
    ///
    /// The new table is built completely before it replaces the old one; on
    /// error the previous table stays in place.
    pub fn setup(&mut self, dice: &[DieSpec]) -> EngineResult<&DistributionTable> {
        let table = DistributionTable::build_with_limit(dice, self.max_table_len)?;
        self.table = table;
        Ok(&self.table)
    }

    /// Probability of `threshold OP sum` against the current table
    pub fn check(&self, threshold: f64, cmp: Comparison) -> f64 {
        self.table.check(threshold, cmp)
    }

    pub fn table(&self) -> &DistributionTable {
        &self.table
    }

    pub fn max_table_len(&self) -> u64 {
        self.max_table_len
    }
}

impl Default for ProbabilityTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot probability for `dice`, building a table only when needed
///
/// # Example
/// ```
/// use dice_odds_core_rs::distribution::probability;
/// use dice_odds_core_rs::{Comparison, DieKind};
///
/// let d6 = DieKind::D6.spec();
/// // Threshold above every sum: no table is built
/// assert_eq!(probability(&[d6, d6], 20.0, Comparison::Ge).unwrap(), 1.0);
/// ```
pub fn probability(dice: &[DieSpec], threshold: f64, cmp: Comparison) -> EngineResult<f64> {
    if let Some(p) = quick::quick_probability(dice, threshold, cmp) {
        return Ok(p);
    }
    Ok(DistributionTable::build(dice)?.check(threshold, cmp))
}
