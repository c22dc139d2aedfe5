//! DiceSheet - several roll groups evaluated together
//!
//! Each [`RollGroup`] pairs a [`DiceEngine`] with its own threshold and
//! comparison. The sheet combines them:
//!
//! - **Chance**: product of every group's chance (groups are independent);
//!   `NaN` when the sheet is empty or any group is undefined.
//! - **Verdict**: failure if any group failed, success only if every group
//!   succeeded; undecided while any group has no complete roll.
//!
//! Every group owns its generator. Group seeds derive from the sheet seed and
//! a creation counter that never repeats, so removing a group does not hand
//! its sequence to the next one.

use serde::Serialize;

use super::config::EngineConfig;
use super::dice_engine::{DiceEngine, RollOutcome};
use crate::dice::DieSpec;
use crate::distribution::DistributionTable;
use crate::error::{EngineError, EngineResult};
use crate::evaluator::{format_percent, Comparison};
use crate::rng::time_seed;

/// Maximum number of roll groups on one sheet
pub const MAX_GROUPS: usize = 100;

/// Outcome of a completed roll against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Success,
    Failure,
}

/// One group of dice rolled and judged together
#[derive(Debug, Clone)]
pub struct RollGroup {
    engine: DiceEngine,
    threshold: f64,
    cmp: Comparison,
    /// Last rolled face per die; `None` until the die has been rolled
    faces: Vec<Option<u64>>,
}

impl RollGroup {
    fn new(engine: DiceEngine, threshold: f64, cmp: Comparison) -> Self {
        Self {
            engine,
            threshold,
            cmp,
            faces: Vec::new(),
        }
    }

    pub fn engine(&self) -> &DiceEngine {
        &self.engine
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn comparison(&self) -> Comparison {
        self.cmp
    }

    /// Set the threshold; `NaN` marks it as unset
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn set_comparison(&mut self, cmp: Comparison) {
        self.cmp = cmp;
    }

    /// Append a die; it has no face until the next roll
    pub fn add_die(&mut self, die: DieSpec) -> EngineResult<usize> {
        let index = self.engine.add_die(die)?;
        self.faces.push(None);
        Ok(index)
    }

    /// Remove a die; the other dice keep their faces
    pub fn remove_die(&mut self, index: usize) -> EngineResult<DieSpec> {
        let die = self.engine.remove_die(index)?;
        self.faces.remove(index);
        Ok(die)
    }

    pub fn set_dice(&mut self, dice: Vec<DieSpec>) -> EngineResult<()> {
        let count = dice.len();
        self.engine.set_dice(dice)?;
        self.faces = vec![None; count];
        Ok(())
    }

    /// Rebuild this group's table now
    pub fn setup(&mut self) -> EngineResult<&DistributionTable> {
        self.engine.setup()
    }

    pub fn faces(&self) -> &[Option<u64>] {
        &self.faces
    }

    pub fn roll_all(&mut self) -> RollOutcome {
        let outcome = self.engine.roll_all();
        self.faces = outcome.faces.iter().copied().map(Some).collect();
        outcome
    }

    /// Sum of the current faces, `None` if any die is unrolled or there are none
    pub fn sum(&self) -> Option<u64> {
        if self.faces.is_empty() {
            return None;
        }
        self.faces.iter().copied().sum()
    }

    /// Probability that this group succeeds on its next roll
    pub fn chance(&mut self) -> f64 {
        self.engine.chance(self.threshold, self.cmp)
    }

    pub fn chance_text(&mut self) -> String {
        self.engine.chance_text(self.threshold, self.cmp)
    }

    /// Verdict of the current faces, `None` while undecided
    pub fn verdict(&self) -> Option<Verdict> {
        let sum = self.sum()?;
        if !self.threshold.is_finite() {
            return None;
        }
        if DiceEngine::is_success(self.threshold, self.cmp, Some(sum)) {
            Some(Verdict::Success)
        } else {
            Some(Verdict::Failure)
        }
    }
}

/// Ordered collection of up to [`MAX_GROUPS`] roll groups
///
/// # Example
/// ```
/// use dice_odds_core_rs::{Comparison, DiceSheet, DieKind};
///
/// let mut sheet = DiceSheet::with_seed("sheet");
/// assert_eq!(sheet.chance_text(), "--%");
///
/// for _ in 0..2 {
///     let index = sheet.add_group(6.0, Comparison::Le).unwrap();
///     sheet.group_mut(index).unwrap().add_die(DieKind::D6.spec()).unwrap();
/// }
/// // Both dice must show a 6
/// assert_eq!(sheet.chance_text(), "2.77778%");
/// ```
#[derive(Debug, Clone)]
pub struct DiceSheet {
    config: EngineConfig,
    base_seed: String,
    created: u64,
    groups: Vec<RollGroup>,
}

impl DiceSheet {
    /// Create an empty sheet; every group engine uses `config` apart from
    /// its derived seed
    ///
    /// # Errors
    /// `EngineError::InvalidConfig` if the configuration is out of range.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    pub fn with_seed(seed: &str) -> Self {
        Self::from_config(EngineConfig::with_seed(seed))
    }

    fn from_config(config: EngineConfig) -> Self {
        let base_seed = config.seed.clone().unwrap_or_else(time_seed);
        Self {
            config,
            base_seed,
            created: 0,
            groups: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[RollGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&RollGroup> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut RollGroup> {
        self.groups.get_mut(index)
    }

    /// Append an empty group; returns its index
    pub fn add_group(&mut self, threshold: f64, cmp: Comparison) -> EngineResult<usize> {
        if self.groups.len() >= MAX_GROUPS {
            return Err(EngineError::TooManyGroups { max: MAX_GROUPS });
        }

        let config = EngineConfig {
            seed: Some(group_seed(&self.base_seed, self.created)),
            ..self.config.clone()
        };
        let engine = DiceEngine::new(config)?;
        self.created += 1;
        self.groups.push(RollGroup::new(engine, threshold, cmp));
        Ok(self.groups.len() - 1)
    }

    pub fn remove_group(&mut self, index: usize) -> EngineResult<RollGroup> {
        if index >= self.groups.len() {
            return Err(EngineError::GroupIndexOutOfRange {
                index,
                len: self.groups.len(),
            });
        }
        Ok(self.groups.remove(index))
    }

    /// Roll every group once, in sheet order
    pub fn roll_all(&mut self) -> Vec<RollOutcome> {
        self.groups.iter_mut().map(RollGroup::roll_all).collect()
    }

    /// Probability that every group succeeds on the next roll
    pub fn chance(&mut self) -> f64 {
        if self.groups.is_empty() {
            return f64::NAN;
        }
        self.groups.iter_mut().map(RollGroup::chance).product()
    }

    pub fn chance_text(&mut self) -> String {
        let p = self.chance();
        format_percent(p, self.config.print_precision)
    }

    /// Combined verdict of the current faces
    ///
    /// `None` for an empty sheet or while any group is undecided.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.groups.is_empty() {
            return None;
        }
        let mut failed = false;
        for group in &self.groups {
            match group.verdict()? {
                Verdict::Failure => failed = true,
                Verdict::Success => {}
            }
        }
        Some(if failed {
            Verdict::Failure
        } else {
            Verdict::Success
        })
    }
}

fn group_seed(base: &str, counter: u64) -> String {
    format!("{}#{}", base, counter)
}
