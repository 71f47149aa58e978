//! Topic domain model.
//!
//! # Responsibility
//! - Define the ESG topic record plotted on the materiality matrix.
//! - Keep score fields bounded through the `Score` type.
//!
//! # Invariants
//! - `id` is stable and never reused for another topic.
//! - `0 <= impact <= 10` and `0 <= importance <= 10` at all times.
//! - `category` is a reference key; the category itself lives in a catalog.
//! - Auxiliary fields are inert for matrix positioning.

use crate::model::category::CategoryId;
use crate::model::quadrant::Quadrant;
use crate::model::score::{Score, ScorePoint};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a matrix topic.
pub type TopicId = Uuid;

/// Qualitative risk rating carried alongside a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Rejected topic construction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicValidationError {
    NilId,
    BlankTitle,
}

impl Display for TopicValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "topic id must not be nil"),
            Self::BlankTitle => write!(f, "topic title must not be blank"),
        }
    }
}

impl Error for TopicValidationError {}

/// ESG subject assessed on the materiality matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub description: String,
    pub category: CategoryId,
    /// Stakeholder-facing severity, vertical axis.
    pub impact: Score,
    /// Business relevance, horizontal axis.
    pub importance: Score,
    pub risk_level: Option<RiskLevel>,
    /// Stakeholder groups that raised this topic.
    pub stakeholders: Vec<String>,
    /// Linked policy documents.
    pub policy_links: Vec<String>,
}

impl Topic {
    /// Creates a topic with a generated id.
    ///
    /// Initial scores are clamped, not rejected.
    pub fn new(
        title: impl Into<String>,
        category: CategoryId,
        importance: f64,
        impact: f64,
    ) -> Result<Self, TopicValidationError> {
        Self::with_id(Uuid::new_v4(), title, category, importance, impact)
    }

    /// Creates a topic with a caller-provided id (survey intake, storage load).
    pub fn with_id(
        id: TopicId,
        title: impl Into<String>,
        category: CategoryId,
        importance: f64,
        impact: f64,
    ) -> Result<Self, TopicValidationError> {
        if id.is_nil() {
            return Err(TopicValidationError::NilId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TopicValidationError::BlankTitle);
        }
        Ok(Self {
            id,
            title,
            description: String::new(),
            category,
            impact: Score::new(impact),
            importance: Score::new(importance),
            risk_level: None,
            stakeholders: Vec::new(),
            policy_links: Vec::new(),
        })
    }

    /// Current matrix position.
    pub fn position(&self) -> ScorePoint {
        ScorePoint {
            importance: self.importance,
            impact: self.impact,
        }
    }

    pub fn quadrant(&self, split: f64) -> Quadrant {
        Quadrant::classify(self.position(), split)
    }

    /// Case-insensitive stakeholder membership check.
    pub fn has_stakeholder(&self, stakeholder: &str) -> bool {
        let needle = stakeholder.trim();
        self.stakeholders
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(needle))
    }

    pub(crate) fn set_position(&mut self, point: ScorePoint) {
        self.importance = point.importance;
        self.impact = point.impact;
    }
}
