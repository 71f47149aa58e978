//! Reusable predicates for `TopicStore::list_topics`.

use crate::model::category::CategoryId;
use crate::model::quadrant::{Quadrant, DEFAULT_QUADRANT_SPLIT};
use crate::model::topic::Topic;
use std::collections::BTreeSet;

/// Category / stakeholder / quadrant / text filter used by matrix pages.
///
/// Empty criteria match everything.
#[derive(Debug, Clone)]
pub struct TopicFilter {
    pub categories: BTreeSet<CategoryId>,
    pub stakeholder: Option<String>,
    pub quadrant: Option<Quadrant>,
    /// Case-insensitive substring match on title.
    pub text: Option<String>,
    pub quadrant_split: f64,
}

impl Default for TopicFilter {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            stakeholder: None,
            quadrant: None,
            text: None,
            quadrant_split: DEFAULT_QUADRANT_SPLIT,
        }
    }
}

impl TopicFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_stakeholder(mut self, stakeholder: impl Into<String>) -> Self {
        self.stakeholder = Some(stakeholder.into());
        self
    }

    pub fn with_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = Some(quadrant);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_quadrant_split(mut self, split: f64) -> Self {
        self.quadrant_split = split;
        self
    }

    pub fn matches(&self, topic: &Topic) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&topic.category) {
            return false;
        }
        if let Some(stakeholder) = self.stakeholder.as_deref() {
            if !stakeholder.trim().is_empty() && !topic.has_stakeholder(stakeholder) {
                return false;
            }
        }
        if let Some(quadrant) = self.quadrant {
            if topic.quadrant(self.quadrant_split) != quadrant {
                return false;
            }
        }
        if let Some(text) = self.text.as_deref() {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty() && !topic.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}
