//! PyO3 wrapper for DiceEngine
//!
//! # Example (from Python)
//!
//! ```python
//! from dice_odds_core_rs import DiceEngine
//!
//! engine = DiceEngine("seed")
//! engine.add_die("d6")
//! engine.add_die("d6")
//! print(engine.chance_text(7, "EQ"))   # 16.66667%
//! faces, total = engine.roll()
//! ```

use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyString;

use crate::dice::DieSpec;
use crate::engine::{DiceEngine as RustDiceEngine, EngineConfig, EngineSnapshot};
use crate::error::EngineError;
use crate::evaluator::Comparison;

impl From<EngineError> for PyErr {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Type(_) => PyTypeError::new_err(err.to_string()),
            EngineError::Value(_)
            | EngineError::TooManyDice { .. }
            | EngineError::DieIndexOutOfRange { .. }
            | EngineError::TooManyGroups { .. }
            | EngineError::GroupIndexOutOfRange { .. }
            | EngineError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Python wrapper for the Rust dice engine
#[pyclass(name = "DiceEngine")]
pub struct PyDiceEngine {
    inner: RustDiceEngine,
}

#[pymethods]
impl PyDiceEngine {
    /// Create an engine
    ///
    /// Raises TypeError if `seed` is given and is not a string.
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let seed = match seed {
            Some(obj) if !obj.is_none() => {
                if !obj.is_instance_of::<PyString>() {
                    return Err(EngineError::Type("seed is not a string".to_string()).into());
                }
                Some(obj.extract::<String>()?)
            }
            _ => None,
        };

        let config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };
        Ok(PyDiceEngine {
            inner: RustDiceEngine::new(config)?,
        })
    }

    /// Add a die by name (`"d6"`, `"D100"`, `"c"`, `"d7"`); returns its index
    fn add_die(&mut self, name: &str) -> PyResult<usize> {
        let die: DieSpec = name.parse()?;
        Ok(self.inner.add_die(die)?)
    }

    /// Remove the die at `index`; returns its name
    fn remove_die(&mut self, index: usize) -> PyResult<String> {
        Ok(self.inner.remove_die(index)?.to_string())
    }

    /// Names of the current dice
    fn dice(&self) -> Vec<String> {
        self.inner.dice().iter().map(|die| die.to_string()).collect()
    }

    /// Rebuild the probability table now
    fn setup(&mut self) -> PyResult<()> {
        self.inner.setup()?;
        Ok(())
    }

    /// Roll all dice; returns `(faces, sum)` with `sum = None` for no dice
    fn roll(&mut self) -> (Vec<u64>, Option<u64>) {
        let outcome = self.inner.roll_all();
        (outcome.faces, outcome.sum)
    }

    /// Probability that `threshold OP sum` holds (`nan` when undefined)
    fn chance(&mut self, threshold: f64, op: &str) -> PyResult<f64> {
        let cmp: Comparison = op.parse()?;
        Ok(self.inner.chance(threshold, cmp))
    }

    /// Formatted percentage for [`PyDiceEngine::chance`]
    fn chance_text(&mut self, threshold: f64, op: &str) -> PyResult<String> {
        let cmp: Comparison = op.parse()?;
        Ok(self.inner.chance_text(threshold, cmp))
    }

    /// Serialized checkpoint
    fn snapshot(&self) -> PyResult<String> {
        Ok(self.inner.snapshot()?.to_json()?)
    }

    /// Restore from a serialized checkpoint
    fn restore(&mut self, json: &str) -> PyResult<()> {
        let snapshot = EngineSnapshot::from_json(json)?;
        self.inner.restore(snapshot)?;
        Ok(())
    }

    fn __len__(&self) -> usize {
        self.inner.dice().len()
    }
}
