//! Matrix quadrant classification for labels and filters.
//!
//! Quadrants are derived on demand from a score pair and never stored.

use crate::model::score::ScorePoint;
use serde::{Deserialize, Serialize};

/// Default split between "low" and "high" on both axes.
pub const DEFAULT_QUADRANT_SPLIT: f64 = 5.0;

/// One of the four matrix regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Top-right: material topics needing priority action.
    HighImpactHighImportance,
    /// Top-left.
    HighImpactLowImportance,
    /// Bottom-right.
    LowImpactHighImportance,
    /// Bottom-left.
    LowImpactLowImportance,
}

impl Quadrant {
    pub const ALL: [Self; 4] = [
        Self::HighImpactHighImportance,
        Self::HighImpactLowImportance,
        Self::LowImpactHighImportance,
        Self::LowImpactLowImportance,
    ];

    /// Classifies a point; values equal to `split` count as high.
    pub fn classify(point: ScorePoint, split: f64) -> Self {
        let high_impact = point.impact.value() >= split;
        let high_importance = point.importance.value() >= split;
        match (high_impact, high_importance) {
            (true, true) => Self::HighImpactHighImportance,
            (true, false) => Self::HighImpactLowImportance,
            (false, true) => Self::LowImpactHighImportance,
            (false, false) => Self::LowImpactLowImportance,
        }
    }

    /// Label rendered in the quadrant corner.
    pub fn label(self) -> &'static str {
        match self {
            Self::HighImpactHighImportance => "High Impact / High Importance",
            Self::HighImpactLowImportance => "High Impact / Low Importance",
            Self::LowImpactHighImportance => "Low Impact / High Importance",
            Self::LowImpactLowImportance => "Low Impact / Low Importance",
        }
    }

    pub fn is_high_impact(self) -> bool {
        matches!(
            self,
            Self::HighImpactHighImportance | Self::HighImpactLowImportance
        )
    }

    pub fn is_high_importance(self) -> bool {
        matches!(
            self,
            Self::HighImpactHighImportance | Self::LowImpactHighImportance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Quadrant, DEFAULT_QUADRANT_SPLIT};
    use crate::model::score::ScorePoint;

    #[test]
    fn split_value_counts_as_high() {
        let point = ScorePoint::new(5.0, 5.0);
        assert_eq!(
            Quadrant::classify(point, DEFAULT_QUADRANT_SPLIT),
            Quadrant::HighImpactHighImportance
        );
    }

    #[test]
    fn classify_covers_all_regions() {
        let cases = [
            (ScorePoint::new(9.2, 8.5), Quadrant::HighImpactHighImportance),
            (ScorePoint::new(2.0, 8.5), Quadrant::HighImpactLowImportance),
            (ScorePoint::new(9.2, 1.0), Quadrant::LowImpactHighImportance),
            (ScorePoint::new(0.0, 0.0), Quadrant::LowImpactLowImportance),
        ];
        for (point, expected) in cases {
            assert_eq!(Quadrant::classify(point, DEFAULT_QUADRANT_SPLIT), expected);
        }
    }

    #[test]
    fn axis_flags_agree_with_classification() {
        for quadrant in Quadrant::ALL {
            let impact = if quadrant.is_high_impact() { 8.0 } else { 2.0 };
            let importance = if quadrant.is_high_importance() { 8.0 } else { 2.0 };
            let point = ScorePoint::new(importance, impact);
            assert_eq!(Quadrant::classify(point, DEFAULT_QUADRANT_SPLIT), quadrant);
        }
        let labels: std::collections::BTreeSet<_> =
            Quadrant::ALL.iter().map(|quadrant| quadrant.label()).collect();
        assert_eq!(labels.len(), 4);
    }
}
