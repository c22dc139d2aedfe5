//! DiceEngine - one dice sheet row: generator, dice, probability table
//!
//! The engine owns its generator exclusively; nothing is shared between
//! engines, so two engines with the same seed are independent, reproducible
//! fixtures.
//!
//! # Table lifecycle
//!
//! Changing the dice marks the table stale. [`DiceEngine::setup`] rebuilds
//! it explicitly (hosts may debounce this); [`DiceEngine::chance`] rebuilds
//! on demand when the table is stale and no fast path applies.

use serde::Serialize;
use std::time::Instant;

use super::checkpoint::{compute_config_hash, EngineSnapshot};
use super::config::EngineConfig;
use crate::dice::{DiceMultiset, DieSpec};
use crate::distribution::{quick, DistributionTable, ProbabilityTable};
use crate::error::{EngineError, EngineResult};
use crate::evaluator::{format_percent, Comparison};
use crate::events::{EngineEvent, EventLog};
use crate::rng::{RngState, SeededRng};

/// Faces from rolling every die once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    /// One face per die, in multiset order
    pub faces: Vec<u64>,
    /// Sum of all faces, `None` when there are no dice
    pub sum: Option<u64>,
}

/// Randomization and exact-probability engine for one group of dice
///
/// # Example
/// ```
/// use dice_odds_core_rs::{Comparison, DiceEngine, DieKind};
///
/// let mut engine = DiceEngine::with_seed("seed");
/// engine.add_die(DieKind::D6.spec()).unwrap();
/// engine.add_die(DieKind::D6.spec()).unwrap();
///
/// assert_eq!(engine.chance(7.0, Comparison::Eq), 1.0 / 6.0);
/// assert_eq!(engine.chance_text(7.0, Comparison::Eq), "16.66667%");
///
/// let roll = engine.roll_all();
/// assert_eq!(roll.faces.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DiceEngine {
    config: EngineConfig,
    rng: SeededRng,
    dice: DiceMultiset,
    probability: ProbabilityTable,
    stale: bool,
    event_log: EventLog,
}

impl DiceEngine {
    /// Create an engine from a validated configuration
    ///
    /// # Errors
    /// `EngineError::InvalidConfig` if the configuration is out of range.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Engine with the default configuration and a fixed seed
    pub fn with_seed(seed: &str) -> Self {
        Self::from_config(EngineConfig::with_seed(seed))
    }

    /// Build from an already validated configuration
    fn from_config(config: EngineConfig) -> Self {
        let rng = SeededRng::from_optional(config.seed.as_deref());
        let mut event_log = EventLog::new();
        let seq = event_log.next_seq();
        event_log.log(EngineEvent::Seeded {
            seq,
            seed_len: config.seed.as_ref().map_or(0, |s| s.chars().count()),
            from_time: config.seed.is_none(),
        });

        Self {
            dice: DiceMultiset::with_limit(config.max_dice),
            probability: ProbabilityTable::with_limit(config.max_table_len),
            stale: false,
            rng,
            event_log,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rng_state(&self) -> RngState {
        self.rng.state()
    }

    pub fn dice(&self) -> &DiceMultiset {
        &self.dice
    }

    /// Whether the table no longer matches the dice
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Current table (possibly stale)
    pub fn table(&self) -> &DistributionTable {
        self.probability.table()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    // ========================================================================
    // Dice Management
    // ========================================================================

    /// Append a die; returns its index
    pub fn add_die(&mut self, die: DieSpec) -> EngineResult<usize> {
        self.dice.push(die)?;
        let index = self.dice.len() - 1;
        self.stale = true;
        let seq = self.event_log.next_seq();
        self.event_log.log(EngineEvent::DieAdded { seq, index, die });
        Ok(index)
    }

    /// Remove the die at `index`
    pub fn remove_die(&mut self, index: usize) -> EngineResult<DieSpec> {
        let die = self.dice.remove(index)?;
        self.stale = true;
        let seq = self.event_log.next_seq();
        self.event_log.log(EngineEvent::DieRemoved { seq, index, die });
        Ok(die)
    }

    /// Replace every die at once
    pub fn set_dice(&mut self, dice: Vec<DieSpec>) -> EngineResult<()> {
        self.dice.replace(dice)?;
        self.stale = true;
        let seq = self.event_log.next_seq();
        self.event_log.log(EngineEvent::DiceReplaced {
            seq,
            dice_count: self.dice.len(),
        });
        Ok(())
    }

    // ========================================================================
    // Probability
    // ========================================================================

    /// Rebuild the distribution table from the current dice
    ///
    /// Dice are convolved smallest first. The previous table is replaced only
    /// once the new one is complete.
    pub fn setup(&mut self) -> EngineResult<&DistributionTable> {
        let started = Instant::now();
        let sorted = self.dice.sorted_by_max();
        self.probability.setup(&sorted)?;
        self.stale = false;

        let table = self.probability.table();
        let seq = self.event_log.next_seq();
        self.event_log.log(EngineEvent::TableRebuilt {
            seq,
            dice_count: table.dice().len(),
            distinct_sums: table.len(),
            total_combinations: table.total().to_string(),
            elapsed_us: started.elapsed().as_micros() as u64,
        });
        Ok(self.probability.table())
    }

    /// Probability of `threshold OP sum` for the current dice
    ///
    /// Out-of-range thresholds and single dice are answered without a
    /// table; otherwise a stale table is rebuilt first. Never fails: `NaN`
    /// for non-finite thresholds, no dice, or a table that cannot be built
    /// within `max_table_len` (call [`DiceEngine::setup`] to see the error).
    pub fn chance(&mut self, threshold: f64, cmp: Comparison) -> f64 {
        if let Some(p) = quick::quick_probability(self.dice.as_slice(), threshold, cmp) {
            return p;
        }
        if self.stale && self.setup().is_err() {
            return f64::NAN;
        }
        self.probability.check(threshold, cmp)
    }

    /// Probability against the current table without rebuilding
    pub fn check(&self, threshold: f64, cmp: Comparison) -> f64 {
        self.probability.check(threshold, cmp)
    }

    /// [`DiceEngine::chance`] formatted with the configured precision
    pub fn chance_text(&mut self, threshold: f64, cmp: Comparison) -> String {
        let p = self.chance(threshold, cmp);
        self.format_percent(p)
    }

    pub fn format_percent(&self, probability: f64) -> String {
        format_percent(probability, self.config.print_precision)
    }

    // ========================================================================
    // Rolling
    // ========================================================================

    /// Roll a single die with this engine's generator
    pub fn roll_die(&mut self, die: &DieSpec) -> u64 {
        die.roll(&mut self.rng)
    }

    /// Roll every die once, in multiset order
    pub fn roll_all(&mut self) -> RollOutcome {
        let faces: Vec<u64> = self
            .dice
            .iter()
            .map(|die| die.roll(&mut self.rng))
            .collect();
        let sum = if faces.is_empty() {
            None
        } else {
            Some(faces.iter().sum())
        };

        let seq = self.event_log.next_seq();
        self.event_log.log(EngineEvent::DiceRolled {
            seq,
            faces: faces.clone(),
            sum,
        });
        RollOutcome { faces, sum }
    }

    /// Whether a rolled sum satisfies `threshold OP sum`
    ///
    /// No sum (no dice) or a non-finite threshold is never a success.
    pub fn is_success(threshold: f64, cmp: Comparison, sum: Option<u64>) -> bool {
        match sum {
            Some(sum) if threshold.is_finite() => cmp.test(threshold, sum),
            _ => false,
        }
    }

    // ========================================================================
    // Checkpointing
    // ========================================================================

    pub fn snapshot(&self) -> EngineResult<EngineSnapshot> {
        Ok(EngineSnapshot {
            rng_state: self.rng.state(),
            dice: self.dice.as_slice().to_vec(),
            config_hash: compute_config_hash(&self.config)?,
        })
    }

    /// Restore generator state and dice, then rebuild the table
    ///
    /// # Errors
    /// `EngineError::Checkpoint` if the snapshot was taken under a different
    /// configuration; dice errors if it holds more dice than allowed.
    pub fn restore(&mut self, snapshot: EngineSnapshot) -> EngineResult<()> {
        let expected = compute_config_hash(&self.config)?;
        if snapshot.config_hash != expected {
            return Err(EngineError::Checkpoint(format!(
                "Config hash mismatch: snapshot {}, engine {}",
                snapshot.config_hash, expected
            )));
        }

        let mut dice = DiceMultiset::with_limit(self.config.max_dice);
        dice.replace(snapshot.dice)?;

        self.rng = SeededRng::from_state(snapshot.rng_state);
        self.dice = dice;
        self.stale = true;
        self.setup()?;

        let seq = self.event_log.next_seq();
        self.event_log.log(EngineEvent::Restored {
            seq,
            dice_count: self.dice.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DieKind;

    #[test]
    fn test_new_logs_seed_event() {
        let engine = DiceEngine::new(EngineConfig::with_seed("abc")).unwrap();
        match engine.event_log().events() {
            [EngineEvent::Seeded {
                seed_len,
                from_time,
                ..
            }] => {
                assert_eq!(*seed_len, 3);
                assert!(!from_time);
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_with_seed_matches_new() {
        let mut a = DiceEngine::with_seed("same");
        let mut b = DiceEngine::new(EngineConfig::with_seed("same")).unwrap();
        assert_eq!(a.config(), b.config());
        assert_eq!(a.event_log().events(), b.event_log().events());

        let d20 = DieKind::D20.spec();
        for _ in 0..20 {
            assert_eq!(a.roll_die(&d20), b.roll_die(&d20));
        }
    }

    #[test]
    fn test_time_seeded_engine() {
        let engine = DiceEngine::new(EngineConfig::default()).unwrap();
        assert!(matches!(
            engine.event_log().events()[0],
            EngineEvent::Seeded { from_time: true, .. }
        ));
    }

    #[test]
    fn test_add_marks_stale_and_setup_clears() {
        let mut engine = DiceEngine::with_seed("stale");
        assert!(!engine.is_stale());
        engine.add_die(DieKind::D4.spec()).unwrap();
        assert!(engine.is_stale());
        assert!(engine.check(2.0, Comparison::Ge).is_nan());

        engine.setup().unwrap();
        assert!(!engine.is_stale());
        assert_eq!(engine.check(2.0, Comparison::Ge), 0.5);
    }

    #[test]
    fn test_failed_setup_keeps_previous_table() {
        let config = EngineConfig {
            max_table_len: 50,
            ..EngineConfig::with_seed("limit")
        };
        let mut engine = DiceEngine::new(config).unwrap();
        engine.add_die(DieKind::D20.spec()).unwrap();
        engine.setup().unwrap();
        let before = engine.table().clone();

        engine.add_die(DieKind::D100.spec()).unwrap();
        assert!(matches!(
            engine.setup(),
            Err(EngineError::TableTooLarge { len: 121, limit: 50 })
        ));
        assert_eq!(engine.table(), &before);
        assert!(engine.is_stale());
    }

    #[test]
    fn test_is_success() {
        assert!(DiceEngine::is_success(7.0, Comparison::Ge, Some(7)));
        assert!(!DiceEngine::is_success(7.0, Comparison::Gt, Some(7)));
        assert!(!DiceEngine::is_success(7.0, Comparison::Ge, None));
        assert!(!DiceEngine::is_success(f64::NAN, Comparison::Le, Some(1)));
    }
}
