//! Core logic for the ESG materiality matrix editor.
//! This crate is the single source of truth for topic score invariants.

pub mod config;
pub mod db;
pub mod interaction;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, MatrixConfig};
pub use interaction::controller::{InteractionController, InteractionState, MatrixEvent, NudgeKey};
pub use interaction::subscription::{EventHub, Subscription};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use mapper::{
    pixel_to_score, pixel_to_score_preview, score_to_pixel, PixelPoint, PlotSurface,
    DEFAULT_MARGIN,
};
pub use model::category::{Category, CategoryCatalog, CategoryError, CategoryId};
pub use model::quadrant::{Quadrant, DEFAULT_QUADRANT_SPLIT};
pub use model::score::{Score, ScorePoint, SCORE_MAX, SCORE_MIN, SCORE_QUANTUM};
pub use model::topic::{RiskLevel, Topic, TopicId, TopicValidationError};
pub use repo::topic_repo::{
    MoveRecord, MoveSource, RepoError, RepoResult, SqliteTopicRepository, TopicRepository,
};
pub use service::matrix_session::{MatrixSession, SessionError};
pub use store::filter::TopicFilter;
pub use store::topic_store::{StoreError, TopicMove, TopicStore};
pub use view::{grid_lines, plot_topics, GridAxis, GridLine, PlottedTopic};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
