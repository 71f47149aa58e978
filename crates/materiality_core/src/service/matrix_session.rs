//! Page-level owner of one materiality matrix.
//!
//! # Responsibility
//! - Load topics and categories from a repository into a `TopicStore`.
//! - Forward input events to the `InteractionController`.
//! - Persist every committed move (scores + history) as the
//!   `onTopicMove` consumer.
//!
//! # Invariants
//! - The in-memory store is the source of truth during a session; a failed
//!   persistence write is recorded, never panicked on, and does not roll
//!   back the committed in-memory move.
//! - Moves that leave the score pair unchanged are not persisted.

use crate::config::{ConfigError, MatrixConfig};
use crate::interaction::controller::{InteractionController, MatrixEvent};
use crate::interaction::subscription::Subscription;
use crate::mapper::{PixelPoint, PlotSurface};
use crate::model::category::{CategoryCatalog, CategoryError};
use crate::model::score::ScorePoint;
use crate::model::topic::{Topic, TopicId};
use crate::repo::topic_repo::{MoveRecord, MoveSource, RepoError, RepoResult, TopicRepository};
use crate::store::filter::TopicFilter;
use crate::store::topic_store::{StoreError, TopicMove, TopicStore};
use crate::view::{grid_lines, plot_topics, GridLine, PlottedTopic};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session bootstrap failure.
#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    Repo(RepoError),
    Store(StoreError),
    Category(CategoryError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Category(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Category(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CategoryError> for SessionError {
    fn from(value: CategoryError) -> Self {
        Self::Category(value)
    }
}

/// Matrix editor session backed by a topic repository.
pub struct MatrixSession<R: TopicRepository> {
    repo: R,
    config: MatrixConfig,
    store: TopicStore,
    catalog: CategoryCatalog,
    controller: InteractionController,
    last_persist_error: Option<RepoError>,
}

impl<R: TopicRepository> MatrixSession<R> {
    /// Validates `config` and loads persisted state.
    pub fn load(repo: R, config: MatrixConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let mut catalog = CategoryCatalog::new();
        for category in repo.list_categories()? {
            catalog.register(category)?;
        }
        let store = TopicStore::from_topics(repo.list_topics()?)?;
        info!(
            "event=session_load module=service status=ok topics={} categories={} read_only={}",
            store.len(),
            catalog.len(),
            config.read_only
        );

        let controller = InteractionController::new(&config);
        Ok(Self {
            repo,
            config,
            store,
            catalog,
            controller,
            last_persist_error: None,
        })
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn store(&self) -> &TopicStore {
        &self.store
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Observes controller events until the guard is dropped.
    #[must_use = "dropping the subscription immediately unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&MatrixEvent) + 'static) -> Subscription {
        self.controller.subscribe(listener)
    }

    /// Surface for a measured container using the configured margin.
    pub fn surface(&self, width: f64, height: f64) -> PlotSurface {
        self.config.surface(width, height)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
        self.controller.set_read_only(read_only);
    }

    pub fn pointer_down(&mut self, topic_id: TopicId) -> bool {
        self.controller.pointer_down(&self.store, topic_id)
    }

    pub fn pointer_move(&mut self, point: PixelPoint, surface: &PlotSurface) -> Option<ScorePoint> {
        self.controller.pointer_move(point, surface)
    }

    pub fn drop_at(&mut self, point: PixelPoint, surface: &PlotSurface) -> Option<TopicMove> {
        let committed = self.controller.drop_at(&mut self.store, point, surface)?;
        self.persist(&committed, MoveSource::Drag);
        Some(committed)
    }

    pub fn release_outside(&mut self, surface: &PlotSurface) -> Option<TopicMove> {
        let committed = self.controller.release_outside(&mut self.store, surface)?;
        self.persist(&committed, MoveSource::Drag);
        Some(committed)
    }

    pub fn pointer_enter(&mut self, topic_id: TopicId) {
        self.controller.pointer_enter(topic_id);
    }

    pub fn pointer_leave(&mut self, topic_id: TopicId) {
        self.controller.pointer_leave(topic_id);
    }

    pub fn select(&mut self, topic_id: TopicId) -> bool {
        self.controller.select(&self.store, topic_id)
    }

    pub fn clear_selection(&mut self) {
        self.controller.clear_selection();
    }

    pub fn selected_topic(&self) -> Option<&Topic> {
        self.controller
            .selected()
            .and_then(|topic_id| self.store.get(topic_id))
    }

    /// Keyboard entry point taking DOM key names.
    pub fn key_down(&mut self, key_name: &str) -> Option<TopicMove> {
        let committed = self.controller.key_down(&mut self.store, key_name)?;
        self.persist(&committed, MoveSource::Keyboard);
        Some(committed)
    }

    /// Removes a topic from the live matrix after an external bulk delete.
    pub fn forget_topic(&mut self, topic_id: TopicId) -> Option<Topic> {
        self.controller.forget_topic(topic_id);
        self.store.remove_topic(topic_id)
    }

    /// Plots filtered topics; quadrants always use the configured split.
    pub fn plot(&self, surface: &PlotSurface, filter: &TopicFilter) -> Vec<PlottedTopic> {
        let filter = filter
            .clone()
            .with_quadrant_split(self.config.quadrant_split);
        plot_topics(&self.store, &self.catalog, &self.controller, surface, &filter)
    }

    pub fn grid(&self, surface: &PlotSurface) -> Vec<GridLine> {
        grid_lines(surface, self.config.show_grid)
    }

    /// Persisted move history for one topic, oldest first.
    pub fn history(&self, topic_id: TopicId) -> RepoResult<Vec<MoveRecord>> {
        self.repo.list_moves(topic_id)
    }

    /// Returns and clears the most recent persistence failure.
    pub fn take_persist_error(&mut self) -> Option<RepoError> {
        self.last_persist_error.take()
    }

    fn persist(&mut self, committed: &TopicMove, source: MoveSource) {
        if committed.is_unchanged() {
            return;
        }
        match self.repo.persist_move(committed, source) {
            Ok(move_id) => info!(
                "event=move_persist module=service status=ok topic_id={} move_id={move_id} source={}",
                committed.id,
                source.as_str()
            ),
            Err(err) => {
                error!(
                    "event=move_persist module=service status=error topic_id={} source={} error={err}",
                    committed.id,
                    source.as_str()
                );
                self.last_persist_error = Some(err);
            }
        }
    }
}
