//! Ordered collection of dice rolled together

use num_bigint::BigUint;
use serde::Serialize;

use super::DieSpec;
use crate::error::{EngineError, EngineResult};

/// Hard upper bound on dice in one multiset
pub const MAX_DICE: usize = 48;

/// An ordered sequence of dice whose faces are summed
///
/// Length is bounded by a limit of at most [`MAX_DICE`]. Order is kept for
/// the host (display, removal by index); sums do not depend on it.
///
/// # Example
/// ```
/// use dice_odds_core_rs::{DiceMultiset, DieKind};
///
/// let mut dice = DiceMultiset::new();
/// dice.push(DieKind::D6.spec()).unwrap();
/// dice.push(DieKind::D6.spec()).unwrap();
/// assert_eq!(dice.min_sum(), 2);
/// assert_eq!(dice.max_sum(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceMultiset {
    dice: Vec<DieSpec>,
    limit: usize,
}

impl DiceMultiset {
    pub fn new() -> Self {
        Self::with_limit(MAX_DICE)
    }

    /// Empty multiset holding at most `limit` dice (clamped to [`MAX_DICE`])
    pub fn with_limit(limit: usize) -> Self {
        Self {
            dice: Vec::new(),
            limit: limit.min(MAX_DICE),
        }
    }

    /// Build from an existing list of dice
    ///
    /// # Errors
    /// `EngineError::TooManyDice` if the list is longer than [`MAX_DICE`].
    pub fn from_dice(dice: Vec<DieSpec>) -> EngineResult<Self> {
        let mut multiset = Self::new();
        multiset.replace(dice)?;
        Ok(multiset)
    }

    /// Append a die
    pub fn push(&mut self, die: DieSpec) -> EngineResult<()> {
        if self.dice.len() >= self.limit {
            return Err(EngineError::TooManyDice {
                max: self.limit,
                got: self.dice.len() + 1,
            });
        }
        self.dice.push(die);
        Ok(())
    }

    /// Remove and return the die at `index`
    pub fn remove(&mut self, index: usize) -> EngineResult<DieSpec> {
        if index >= self.dice.len() {
            return Err(EngineError::DieIndexOutOfRange {
                index,
                len: self.dice.len(),
            });
        }
        Ok(self.dice.remove(index))
    }

    /// Replace all dice at once
    pub fn replace(&mut self, dice: Vec<DieSpec>) -> EngineResult<()> {
        if dice.len() > self.limit {
            return Err(EngineError::TooManyDice {
                max: self.limit,
                got: dice.len(),
            });
        }
        self.dice = dice;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.dice.clear();
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Whether another die can be added
    pub fn is_full(&self) -> bool {
        self.dice.len() >= self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn get(&self, index: usize) -> Option<&DieSpec> {
        self.dice.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DieSpec> {
        self.dice.iter()
    }

    pub fn as_slice(&self) -> &[DieSpec] {
        &self.dice
    }

    /// Smallest achievable sum (0 when empty)
    pub fn min_sum(&self) -> u64 {
        min_sum(&self.dice)
    }

    /// Largest achievable sum (0 when empty)
    pub fn max_sum(&self) -> u64 {
        max_sum(&self.dice)
    }

    /// Number of distinct face combinations, the product of face counts
    pub fn combinations(&self) -> BigUint {
        combinations(&self.dice)
    }

    /// Dice ordered by highest face, smallest first
    ///
    /// Convolving small dice first keeps the intermediate buffers short.
    pub fn sorted_by_max(&self) -> Vec<DieSpec> {
        let mut dice = self.dice.clone();
        dice.sort_by_key(|die| (die.max(), die.step()));
        dice
    }
}

impl Default for DiceMultiset {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DiceMultiset {
    type Item = &'a DieSpec;
    type IntoIter = std::slice::Iter<'a, DieSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}

pub(crate) fn min_sum(dice: &[DieSpec]) -> u64 {
    dice.iter().map(DieSpec::min).sum()
}

pub(crate) fn max_sum(dice: &[DieSpec]) -> u64 {
    dice.iter().map(DieSpec::max).sum()
}

pub(crate) fn combinations(dice: &[DieSpec]) -> BigUint {
    dice.iter()
        .fold(BigUint::from(1u32), |acc, die| acc * BigUint::from(die.faces()))
}
