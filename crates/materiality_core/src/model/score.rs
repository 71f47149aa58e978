//! Bounded score values for the materiality matrix axes.
//!
//! # Responsibility
//! - Represent impact/importance scores that can never leave `[0, 10]`.
//! - Provide the one-decimal storage granularity used at commit time.
//!
//! # Invariants
//! - Every constructed `Score` lies within `[SCORE_MIN, SCORE_MAX]`.
//! - Out-of-range input is clamped, never rejected.
//! - `NaN` resolves to `SCORE_MIN`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lower bound of both matrix axes.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of both matrix axes.
pub const SCORE_MAX: f64 = 10.0;
/// Storage granularity for committed scores.
pub const SCORE_QUANTUM: f64 = 0.1;
const QUANTUM_STEPS_PER_UNIT: f64 = 10.0;

/// One axis value on the materiality matrix.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const MIN: Self = Self(SCORE_MIN);
    pub const MAX: Self = Self(SCORE_MAX);

    /// Creates a score, clamping into `[0, 10]`.
    pub fn new(value: f64) -> Self {
        Self(clamp_score(value))
    }

    /// Creates a score clamped into range and rounded to one decimal place.
    pub fn rounded_from(value: f64) -> Self {
        Self::new(value).rounded()
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Rounds to the storage quantum (one decimal place).
    pub fn rounded(self) -> Self {
        Self(clamp_score(round_to_quantum(self.0)))
    }

    /// Adds `delta` and re-applies clamping and rounding.
    pub fn stepped(self, delta: f64) -> Self {
        Self::rounded_from(self.0 + delta)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Score pair for one matrix position.
///
/// Field order follows the plotting axes: importance is horizontal,
/// impact is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScorePoint {
    pub importance: Score,
    pub impact: Score,
}

impl ScorePoint {
    /// Builds a clamped (unrounded) score pair.
    pub fn new(importance: f64, impact: f64) -> Self {
        Self {
            importance: Score::new(importance),
            impact: Score::new(impact),
        }
    }

    /// Returns the pair rounded to the storage quantum.
    pub fn rounded(self) -> Self {
        Self {
            importance: self.importance.rounded(),
            impact: self.impact.rounded(),
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return SCORE_MIN;
    }
    value.clamp(SCORE_MIN, SCORE_MAX)
}

fn round_to_quantum(value: f64) -> f64 {
    // Dividing by the step count keeps results identical to decimal literals.
    (value * QUANTUM_STEPS_PER_UNIT).round() / QUANTUM_STEPS_PER_UNIT
}
