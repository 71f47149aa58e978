//! Matrix editor configuration.
//!
//! # Responsibility
//! - Carry page-level options into the controller and view builders.
//! - Parse JSON settings payloads with defaults for missing keys.
//!
//! # Invariants
//! - A validated config has a finite non-negative margin, a nudge step in
//!   `(0, 10]` and a quadrant split in `[0, 10]`.

use crate::mapper::{PlotSurface, DEFAULT_MARGIN};
use crate::model::quadrant::DEFAULT_QUADRANT_SPLIT;
use crate::model::score::{SCORE_MAX, SCORE_MIN, SCORE_QUANTUM};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Config parse/validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidMargin(f64),
    InvalidNudgeStep(f64),
    InvalidQuadrantSplit(f64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid matrix config: {err}"),
            Self::InvalidMargin(value) => {
                write!(f, "margin must be finite and >= 0, got {value}")
            }
            Self::InvalidNudgeStep(value) => {
                write!(f, "nudge_step must be in (0, 10], got {value}")
            }
            Self::InvalidQuadrantSplit(value) => {
                write!(f, "quadrant_split must be in [0, 10], got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Options for one materiality matrix instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Plot inset in pixels.
    pub margin: f64,
    /// Score delta per arrow keypress.
    pub nudge_step: f64,
    /// Low/high boundary for quadrant labels.
    pub quadrant_split: f64,
    pub read_only: bool,
    pub show_grid: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            nudge_step: SCORE_QUANTUM,
            quadrant_split: DEFAULT_QUADRANT_SPLIT,
            read_only: false,
            show_grid: true,
        }
    }
}

impl MatrixConfig {
    /// Parses and validates a JSON settings object.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.margin));
        }
        if !(self.nudge_step > 0.0 && self.nudge_step <= SCORE_MAX) {
            return Err(ConfigError::InvalidNudgeStep(self.nudge_step));
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&self.quadrant_split) {
            return Err(ConfigError::InvalidQuadrantSplit(self.quadrant_split));
        }
        Ok(())
    }

    /// Builds a plot surface for a measured container using this margin.
    pub fn surface(&self, width: f64, height: f64) -> PlotSurface {
        PlotSurface::with_margin(width, height, self.margin)
    }
}
