//! Pointer and keyboard interaction controller for the matrix editor.
//!
//! # Responsibility
//! - Track transient drag/hover state and the independent selection.
//! - Translate drops and arrow-key nudges into `TopicStore::move_topic`.
//! - Notify subscribers about selections, commits and state changes.
//!
//! # Invariants
//! - The store is written only on drop or key nudge, never on pointer move.
//! - Read-only mode suppresses drag start and nudging; select and hover
//!   remain active.
//! - Referencing a topic that no longer exists is a silent no-op.
//! - All handlers are synchronous and return before the next input event.

use crate::config::MatrixConfig;
use crate::interaction::subscription::{EventHub, Subscription};
use crate::mapper::{pixel_to_score, pixel_to_score_preview, PixelPoint, PlotSurface};
use crate::model::score::{Score, ScorePoint};
use crate::model::topic::{Topic, TopicId};
use crate::store::topic_store::{TopicMove, TopicStore};
use log::{debug, info, warn};

/// Transient pointer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    Dragging {
        topic_id: TopicId,
        /// Last pointer position seen during the drag.
        last_pointer: Option<PixelPoint>,
    },
    Hovering(TopicId),
}

impl InteractionState {
    pub fn dragged_topic(&self) -> Option<TopicId> {
        match self {
            Self::Dragging { topic_id, .. } => Some(*topic_id),
            _ => None,
        }
    }

    pub fn hovered_topic(&self) -> Option<TopicId> {
        match self {
            Self::Hovering(topic_id) => Some(*topic_id),
            _ => None,
        }
    }
}

/// Arrow keys that nudge the selected topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeKey {
    /// Raises impact.
    Up,
    /// Lowers impact.
    Down,
    /// Lowers importance.
    Left,
    /// Raises importance.
    Right,
}

impl NudgeKey {
    /// Parses DOM `KeyboardEvent.key` names.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "Up" => Some(Self::Up),
            "ArrowDown" | "Down" => Some(Self::Down),
            "ArrowLeft" | "Left" => Some(Self::Left),
            "ArrowRight" | "Right" => Some(Self::Right),
            _ => None,
        }
    }

    /// `(importance_delta, impact_delta)` for one keypress.
    /// Steps the axis this key names; the other axis is copied untouched.
    fn apply(self, current: ScorePoint, step: f64) -> ScorePoint {
        match self {
            Self::Up => ScorePoint {
                impact: current.impact.stepped(step),
                ..current
            },
            Self::Down => ScorePoint {
                impact: current.impact.stepped(-step),
                ..current
            },
            Self::Left => ScorePoint {
                importance: current.importance.stepped(-step),
                ..current
            },
            Self::Right => ScorePoint {
                importance: current.importance.stepped(step),
                ..current
            },
        }
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixEvent {
    StateChanged(InteractionState),
    /// `onTopicSelect` contract.
    TopicSelected(Topic),
    SelectionCleared,
    /// `onTopicMove` contract; emitted once per committed move.
    TopicMoved {
        id: TopicId,
        impact: Score,
        importance: Score,
    },
    /// Live drag feedback; nothing has been committed.
    DragPreview { id: TopicId, position: ScorePoint },
}

/// Input-to-state translator for one matrix instance.
pub struct InteractionController {
    state: InteractionState,
    selected: Option<TopicId>,
    read_only: bool,
    nudge_step: f64,
    events: EventHub<MatrixEvent>,
}

impl InteractionController {
    pub fn new(config: &MatrixConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            selected: None,
            read_only: config.read_only,
            nudge_step: config.nudge_step,
            events: EventHub::new(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected(&self) -> Option<TopicId> {
        self.selected
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Toggles read-only mode. An active drag is abandoned without commit.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only && self.state.dragged_topic().is_some() {
            debug!("event=drag_cancel module=interaction status=ok reason=read_only");
            self.transition(InteractionState::Idle);
        }
    }

    /// Registers a change listener for as long as the guard lives.
    #[must_use = "dropping the subscription immediately unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&MatrixEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    /// Pointer pressed on a topic dot. Returns whether a drag started.
    pub fn pointer_down(&mut self, store: &TopicStore, topic_id: TopicId) -> bool {
        if self.read_only {
            debug!("event=drag_start module=interaction status=skip reason=read_only topic_id={topic_id}");
            return false;
        }
        if self.state.dragged_topic().is_some() {
            return false;
        }
        if !store.contains(topic_id) {
            debug!("event=drag_start module=interaction status=skip reason=not_found topic_id={topic_id}");
            return false;
        }

        debug!("event=drag_start module=interaction status=ok topic_id={topic_id}");
        self.transition(InteractionState::Dragging {
            topic_id,
            last_pointer: None,
        });
        true
    }

    /// Pointer moved while possibly dragging.
    ///
    /// Returns the clamped, unrounded preview position. The store is not
    /// written.
    pub fn pointer_move(&mut self, point: PixelPoint, surface: &PlotSurface) -> Option<ScorePoint> {
        let InteractionState::Dragging { topic_id, .. } = self.state else {
            return None;
        };
        self.state = InteractionState::Dragging {
            topic_id,
            last_pointer: Some(point),
        };

        let position = pixel_to_score_preview(point.x, point.y, surface)?;
        self.events.emit(&MatrixEvent::DragPreview {
            id: topic_id,
            position,
        });
        Some(position)
    }

    /// Pointer released at `point`; commits the drag.
    pub fn drop_at(
        &mut self,
        store: &mut TopicStore,
        point: PixelPoint,
        surface: &PlotSurface,
    ) -> Option<TopicMove> {
        let topic_id = self.state.dragged_topic()?;
        self.transition(InteractionState::Idle);

        let Some(target) = pixel_to_score(point.x, point.y, surface) else {
            warn!(
                "event=topic_drop module=interaction status=skip reason=degenerate_surface topic_id={topic_id} width={} height={}",
                surface.width, surface.height
            );
            return None;
        };
        self.commit(store, topic_id, target, "drop")
    }

    /// Pointer released outside any valid target.
    ///
    /// Treated as a drop at the last known pointer position. Without a
    /// recorded position the drag is cancelled.
    pub fn release_outside(
        &mut self,
        store: &mut TopicStore,
        surface: &PlotSurface,
    ) -> Option<TopicMove> {
        let InteractionState::Dragging {
            topic_id,
            last_pointer,
        } = self.state
        else {
            return None;
        };

        match last_pointer {
            Some(point) => self.drop_at(store, point, surface),
            None => {
                debug!("event=drag_cancel module=interaction status=ok reason=no_pointer topic_id={topic_id}");
                self.transition(InteractionState::Idle);
                None
            }
        }
    }

    pub fn pointer_enter(&mut self, topic_id: TopicId) {
        match self.state {
            InteractionState::Dragging { .. } => {}
            InteractionState::Hovering(current) if current == topic_id => {}
            _ => self.transition(InteractionState::Hovering(topic_id)),
        }
    }

    pub fn pointer_leave(&mut self, topic_id: TopicId) {
        if self.state == InteractionState::Hovering(topic_id) {
            self.transition(InteractionState::Idle);
        }
    }

    /// Click-to-select. Allowed in read-only mode.
    ///
    /// Returns whether the topic exists and is now selected.
    pub fn select(&mut self, store: &TopicStore, topic_id: TopicId) -> bool {
        let Some(topic) = store.get(topic_id) else {
            debug!("event=topic_select module=interaction status=skip reason=not_found topic_id={topic_id}");
            return false;
        };
        self.selected = Some(topic_id);
        self.events.emit(&MatrixEvent::TopicSelected(topic.clone()));
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.events.emit(&MatrixEvent::SelectionCleared);
        }
    }

    /// Arrow-key nudge of the selected topic, committed immediately.
    pub fn nudge(&mut self, store: &mut TopicStore, key: NudgeKey) -> Option<TopicMove> {
        if self.read_only {
            debug!("event=topic_nudge module=interaction status=skip reason=read_only");
            return None;
        }
        let topic_id = self.selected?;
        let Some(current) = store.get(topic_id).map(Topic::position) else {
            debug!("event=topic_nudge module=interaction status=skip reason=not_found topic_id={topic_id}");
            return None;
        };

        let target = key.apply(current, self.nudge_step);
        self.commit(store, topic_id, target, "nudge")
    }

    /// Keyboard entry point taking DOM key names. Non-arrow keys are ignored.
    pub fn key_down(&mut self, store: &mut TopicStore, key_name: &str) -> Option<TopicMove> {
        let key = NudgeKey::from_key_name(key_name)?;
        self.nudge(store, key)
    }

    /// Drops transient references to a topic removed from the store.
    pub fn forget_topic(&mut self, topic_id: TopicId) {
        if self.selected == Some(topic_id) {
            self.clear_selection();
        }
        let references_topic = self.state.dragged_topic() == Some(topic_id)
            || self.state.hovered_topic() == Some(topic_id);
        if references_topic {
            self.transition(InteractionState::Idle);
        }
    }

    fn commit(
        &mut self,
        store: &mut TopicStore,
        topic_id: TopicId,
        target: ScorePoint,
        source: &'static str,
    ) -> Option<TopicMove> {
        let committed = store.move_topic(
            topic_id,
            target.importance.value(),
            target.impact.value(),
        )?;
        info!(
            "event=topic_commit module=interaction status=ok source={source} topic_id={topic_id} importance={} impact={}",
            committed.to.importance, committed.to.impact
        );
        self.events.emit(&MatrixEvent::TopicMoved {
            id: committed.id,
            impact: committed.to.impact,
            importance: committed.to.importance,
        });
        Some(committed)
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state == next {
            return;
        }
        self.state = next;
        self.events.emit(&MatrixEvent::StateChanged(next));
    }
}
