//! Die specifications and the draw → face mapping

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::rng::SeededRng;

/// Largest integer an f64 represents exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Value domain of a single die
///
/// `Uniform { faces }` rolls `1..=faces`; `Stepped { step, max }` rolls
/// `step, 2*step, ..., max`. A uniform die is exactly a stepped die with
/// `step == 1`, and [`DieSpec::stepped`] normalizes to `Uniform` in that case
/// so equal domains compare equal.
///
/// # Example
/// ```
/// use dice_odds_core_rs::DieSpec;
///
/// let d6 = DieSpec::uniform(6).unwrap();
/// assert_eq!(d6, DieSpec::stepped(1, 6).unwrap());
///
/// let percentile = DieSpec::stepped(10, 100).unwrap();
/// assert_eq!(percentile.faces(), 10);
/// assert_eq!(percentile.face_from_draw(0), 10);
/// assert_eq!(percentile.face_from_draw(u32::MAX), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", try_from = "RawDieSpec")]
pub enum DieSpec {
    Uniform { faces: u64 },
    Stepped { step: u64, max: u64 },
}

impl DieSpec {
    /// Die with faces `1..=faces`
    ///
    /// # Errors
    /// `EngineError::Value` if `faces` is zero or above 2^53 - 1.
    pub fn uniform(faces: u64) -> EngineResult<Self> {
        check_positive_safe("faces", faces)?;
        Ok(DieSpec::Uniform { faces })
    }

    /// Die with faces `step, 2*step, ..., max`
    ///
    /// # Errors
    /// `EngineError::Value` if either parameter is zero or unsafe, or `max`
    /// is not a multiple of `step`.
    pub fn stepped(step: u64, max: u64) -> EngineResult<Self> {
        check_positive_safe("step", step)?;
        check_positive_safe("max", max)?;
        if max % step != 0 {
            return Err(EngineError::Value(format!(
                "max {} is not a multiple of step {}",
                max, step
            )));
        }
        if step == 1 {
            return Ok(DieSpec::Uniform { faces: max });
        }
        Ok(DieSpec::Stepped { step, max })
    }

    /// Build a uniform die from an untyped number
    ///
    /// Rejects fractional, non-finite and non-positive values.
    pub fn uniform_from_f64(faces: f64) -> EngineResult<Self> {
        Self::uniform(integer_from_f64("faces", faces)?)
    }

    /// Build a stepped die from untyped numbers
    pub fn stepped_from_f64(step: f64, max: f64) -> EngineResult<Self> {
        Self::stepped(integer_from_f64("step", step)?, integer_from_f64("max", max)?)
    }

    /// Distance between consecutive faces (1 for uniform dice)
    pub fn step(&self) -> u64 {
        match *self {
            DieSpec::Uniform { .. } => 1,
            DieSpec::Stepped { step, .. } => step,
        }
    }

    /// Highest face value
    pub fn max(&self) -> u64 {
        match *self {
            DieSpec::Uniform { faces } => faces,
            DieSpec::Stepped { max, .. } => max,
        }
    }

    /// Lowest face value (equal to the step)
    pub fn min(&self) -> u64 {
        self.step()
    }

    /// Number of distinct faces
    pub fn faces(&self) -> u64 {
        match *self {
            DieSpec::Uniform { faces } => faces,
            DieSpec::Stepped { step, max } => max / step,
        }
    }

    /// All face values in ascending order
    pub fn face_values(&self) -> impl Iterator<Item = u64> {
        let step = self.step();
        (1..=self.faces()).map(move |i| i * step)
    }

    /// Whether `value` is one of this die's faces
    pub fn has_face(&self, value: u64) -> bool {
        value >= self.min() && value <= self.max() && value % self.step() == 0
    }

    /// Map one 32-bit draw onto a face by scaled truncation
    ///
    /// `step + step * floor(draw * faces / 2^32)`, computed exactly in
    /// 128-bit arithmetic.
    pub fn face_from_draw(&self, draw: u32) -> u64 {
        let index = ((draw as u128 * self.faces() as u128) >> 32) as u64;
        self.step() + self.step() * index
    }

    /// Draw once from `rng` and map it onto a face
    ///
    /// # Example
    /// ```
    /// use dice_odds_core_rs::{DieSpec, SeededRng};
    ///
    /// let mut rng = SeededRng::new("seed");
    /// let d6 = DieSpec::uniform(6).unwrap();
    /// assert_eq!(d6.roll(&mut rng), 5);
    /// ```
    pub fn roll(&self, rng: &mut SeededRng) -> u64 {
        self.face_from_draw(rng.next_u32())
    }

    /// Preset this die matches, if any
    pub fn kind(&self) -> Option<DieKind> {
        DieKind::ALL.iter().copied().find(|kind| kind.spec() == *self)
    }
}

impl fmt::Display for DieSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = self.kind() {
            return f.write_str(kind.name());
        }
        match *self {
            DieSpec::Uniform { faces } => write!(f, "D{}", faces),
            DieSpec::Stepped { step, max } => write!(f, "D{}/{}", max, step),
        }
    }
}

impl FromStr for DieSpec {
    type Err = EngineError;

    /// Parse a preset name (`d20`, `D100`, `c`), `dN`, or `dMAX/STEP`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(kind) = trimmed.parse::<DieKind>() {
            return Ok(kind.spec());
        }

        let body = trimmed
            .strip_prefix('d')
            .or_else(|| trimmed.strip_prefix('D'))
            .ok_or_else(|| EngineError::Value(format!("Unknown die '{}'", s)))?;

        let parse = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| EngineError::Value(format!("Unknown die '{}'", s)))
        };

        match body.split_once('/') {
            Some((max, step)) => DieSpec::stepped(parse(step)?, parse(max)?),
            None => DieSpec::uniform(parse(body)?),
        }
    }
}

/// Dice offered by the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieKind {
    /// Coin (two faces)
    C,
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    /// Percentile die: 10, 20, ..., 100
    D100,
}

impl DieKind {
    pub const ALL: [DieKind; 8] = [
        DieKind::C,
        DieKind::D4,
        DieKind::D6,
        DieKind::D8,
        DieKind::D10,
        DieKind::D12,
        DieKind::D20,
        DieKind::D100,
    ];

    pub fn spec(&self) -> DieSpec {
        match self {
            DieKind::C => DieSpec::Uniform { faces: 2 },
            DieKind::D4 => DieSpec::Uniform { faces: 4 },
            DieKind::D6 => DieSpec::Uniform { faces: 6 },
            DieKind::D8 => DieSpec::Uniform { faces: 8 },
            DieKind::D10 => DieSpec::Uniform { faces: 10 },
            DieKind::D12 => DieSpec::Uniform { faces: 12 },
            DieKind::D20 => DieSpec::Uniform { faces: 20 },
            DieKind::D100 => DieSpec::Stepped { step: 10, max: 100 },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DieKind::C => "C",
            DieKind::D4 => "D4",
            DieKind::D6 => "D6",
            DieKind::D8 => "D8",
            DieKind::D10 => "D10",
            DieKind::D12 => "D12",
            DieKind::D20 => "D20",
            DieKind::D100 => "D100",
        }
    }
}

impl FromStr for DieKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DieKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::Value(format!("Unknown die kind '{}'", s)))
    }
}

/// Untyped wire form, validated into a [`DieSpec`]
#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawDieSpec {
    Uniform { faces: f64 },
    Stepped { step: f64, max: f64 },
}

impl TryFrom<RawDieSpec> for DieSpec {
    type Error = EngineError;

    fn try_from(raw: RawDieSpec) -> Result<Self, Self::Error> {
        match raw {
            RawDieSpec::Uniform { faces } => DieSpec::uniform_from_f64(faces),
            RawDieSpec::Stepped { step, max } => DieSpec::stepped_from_f64(step, max),
        }
    }
}

fn check_positive_safe(name: &str, value: u64) -> EngineResult<()> {
    if value == 0 {
        return Err(EngineError::Value(format!("{} must be positive", name)));
    }
    if value > MAX_SAFE_INTEGER {
        return Err(EngineError::Value(format!(
            "{} {} exceeds 2^53 - 1",
            name, value
        )));
    }
    Ok(())
}

fn integer_from_f64(name: &str, value: f64) -> EngineResult<u64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(EngineError::Value(format!(
            "{} must be an integer, got {}",
            name, value
        )));
    }
    if value <= 0.0 {
        return Err(EngineError::Value(format!("{} must be positive", name)));
    }
    if value > MAX_SAFE_INTEGER as f64 {
        return Err(EngineError::Value(format!("{} {} exceeds 2^53 - 1", name, value)));
    }
    Ok(value as u64)
}
