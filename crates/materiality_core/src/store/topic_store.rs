//! In-memory authoritative topic collection.
//!
//! # Responsibility
//! - Own the ordered topic list backing one matrix.
//! - Expose `move_topic` as the single score mutation path.
//!
//! # Invariants
//! - Exactly one topic per id.
//! - Mutation never changes `id`, `category` or auxiliary fields.
//! - Moving an unknown id is a silent no-op (drag events can race with
//!   external deletion).

use crate::model::score::ScorePoint;
use crate::model::topic::{Topic, TopicId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateTopic(TopicId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTopic(id) => write!(f, "topic already present in store: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Result of one committed score change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopicMove {
    pub id: TopicId,
    pub from: ScorePoint,
    pub to: ScorePoint,
}

impl TopicMove {
    /// True when the committed pair equals the previous one.
    pub fn is_unchanged(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered topic collection with a single write path.
#[derive(Debug, Clone, Default)]
pub struct TopicStore {
    topics: Vec<Topic>,
}

impl TopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from topics in order, rejecting duplicate ids.
    pub fn from_topics(topics: impl IntoIterator<Item = Topic>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for topic in topics {
            store.insert(topic)?;
        }
        Ok(store)
    }

    /// Appends a newly created topic.
    pub fn insert(&mut self, topic: Topic) -> Result<(), StoreError> {
        if self.contains(topic.id) {
            return Err(StoreError::DuplicateTopic(topic.id));
        }
        self.topics.push(topic);
        Ok(())
    }

    /// Replaces the score pair of `id` with clamped values.
    ///
    /// Returns `None` without touching the store when `id` is unknown.
    pub fn move_topic(
        &mut self,
        id: TopicId,
        new_importance: f64,
        new_impact: f64,
    ) -> Option<TopicMove> {
        let Some(topic) = self.topics.iter_mut().find(|topic| topic.id == id) else {
            debug!("event=topic_move module=store status=skip reason=not_found topic_id={id}");
            return None;
        };

        let from = topic.position();
        let to = ScorePoint::new(new_importance, new_impact);
        topic.set_position(to);
        debug!(
            "event=topic_move module=store status=ok topic_id={id} importance={} impact={}",
            to.importance, to.impact
        );
        Some(TopicMove { id, from, to })
    }

    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    pub fn contains(&self, id: TopicId) -> bool {
        self.get(id).is_some()
    }

    /// Topics in store order that satisfy `predicate`.
    pub fn list_topics<F>(&self, predicate: F) -> Vec<&Topic>
    where
        F: Fn(&Topic) -> bool,
    {
        self.topics.iter().filter(|topic| predicate(topic)).collect()
    }

    /// Read-only view of every topic in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    /// Owned copy of the current collection.
    pub fn snapshot(&self) -> Vec<Topic> {
        self.topics.clone()
    }

    /// Removes a topic on behalf of external bulk operations.
    pub fn remove_topic(&mut self, id: TopicId) -> Option<Topic> {
        let index = self.topics.iter().position(|topic| topic.id == id)?;
        Some(self.topics.remove(index))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
