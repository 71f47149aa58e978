//! FFI use-case API for the dashboard UI.
//!
//! # Responsibility
//! - Expose stable matrix functions to the Flutter/Dart presentation layer.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each DB-backed call opens its own connection.

use materiality_core::db::open_db;
use materiality_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, pixel_to_score,
    ping as ping_inner, score_to_pixel, MatrixConfig, MatrixSession, PixelPoint, PlotSurface,
    SqliteTopicRepository, TopicFilter, TopicMove,
};
use rusqlite::Connection;
use uuid::Uuid;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Pixel position inside the plot container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixPixel {
    pub x: f64,
    pub y: f64,
}

/// Committed score pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixScore {
    pub importance: f64,
    pub impact: f64,
}

/// Plotted topic row for list rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTopicItem {
    pub topic_id: String,
    pub title: String,
    pub category: String,
    pub color: String,
    pub importance: f64,
    pub impact: f64,
    pub x: f64,
    pub y: f64,
    /// Quadrant label text.
    pub quadrant: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTopicsResponse {
    pub ok: bool,
    pub items: Vec<MatrixTopicItem>,
    pub message: String,
}

/// Result envelope for drop/nudge commits.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixMoveResponse {
    pub ok: bool,
    /// `None` when nothing was committed (read-only, unknown topic,
    /// unmeasured surface).
    pub score: Option<MatrixScore>,
    pub message: String,
}

impl MatrixMoveResponse {
    fn committed(topic_move: &TopicMove) -> Self {
        Self {
            ok: true,
            score: Some(MatrixScore {
                importance: topic_move.to.importance.value(),
                impact: topic_move.to.impact.value(),
            }),
            message: "Move committed.".to_string(),
        }
    }

    fn skipped(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            score: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            score: None,
            message: message.into(),
        }
    }
}

/// Maps scores onto a `width x height` container with the default margin.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_score_to_pixel(importance: f64, impact: f64, width: f64, height: f64) -> MatrixPixel {
    let pixel = score_to_pixel(importance, impact, &PlotSurface::new(width, height));
    MatrixPixel {
        x: pixel.x,
        y: pixel.y,
    }
}

/// Maps a pointer position to clamped, rounded scores.
///
/// Returns `None` while the container is unmeasured.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_pixel_to_score(x: f64, y: f64, width: f64, height: f64) -> Option<MatrixScore> {
    pixel_to_score(x, y, &PlotSurface::new(width, height)).map(|point| MatrixScore {
        importance: point.importance.value(),
        impact: point.impact.value(),
    })
}

/// Lists persisted topics positioned for a `width x height` container.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_list_topics(db_path: String, width: f64, height: f64) -> MatrixTopicsResponse {
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return topics_failure(format!("matrix_list_topics failed: {err}")),
    };
    let session = match load_session(&conn, false) {
        Ok(session) => session,
        Err(message) => return topics_failure(message),
    };

    let surface = session.surface(width, height);
    let items = session
        .plot(&surface, &TopicFilter::all())
        .into_iter()
        .map(|plotted| {
            let category = session
                .store()
                .get(plotted.id)
                .map(|topic| topic.category.to_string())
                .unwrap_or_default();
            MatrixTopicItem {
                topic_id: plotted.id.to_string(),
                title: plotted.title,
                category,
                color: plotted.color,
                importance: plotted.position.importance.value(),
                impact: plotted.position.impact.value(),
                x: plotted.pixel.x,
                y: plotted.pixel.y,
                quadrant: plotted.quadrant.label().to_string(),
            }
        })
        .collect::<Vec<_>>();

    MatrixTopicsResponse {
        ok: true,
        message: format!("Loaded {} topic(s).", items.len()),
        items,
    }
}

/// Commits a drag of `topic_id` released at `(x, y)`.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_drop_topic(
    db_path: String,
    topic_id: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    read_only: bool,
) -> MatrixMoveResponse {
    let topic_id = match parse_topic_id(&topic_id) {
        Ok(id) => id,
        Err(message) => return MatrixMoveResponse::failure(message),
    };
    with_session(&db_path, read_only, |session| {
        if !session.pointer_down(topic_id) {
            return None;
        }
        let surface = session.surface(width, height);
        session.drop_at(PixelPoint::new(x, y), &surface)
    })
}

/// Applies one arrow-key nudge (`ArrowUp`, `ArrowDown`, ...) to `topic_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_nudge_topic(
    db_path: String,
    topic_id: String,
    key: String,
    read_only: bool,
) -> MatrixMoveResponse {
    let topic_id = match parse_topic_id(&topic_id) {
        Ok(id) => id,
        Err(message) => return MatrixMoveResponse::failure(message),
    };
    with_session(&db_path, read_only, |session| {
        if !session.select(topic_id) {
            return None;
        }
        session.key_down(key.as_str())
    })
}

type FfiSession<'conn> = MatrixSession<SqliteTopicRepository<'conn>>;

fn load_session(conn: &Connection, read_only: bool) -> Result<FfiSession<'_>, String> {
    let config = MatrixConfig {
        read_only,
        ..MatrixConfig::default()
    };
    MatrixSession::load(SqliteTopicRepository::new(conn), config)
        .map_err(|err| format!("failed to load matrix: {err}"))
}

fn with_session(
    db_path: &str,
    read_only: bool,
    action: impl FnOnce(&mut FfiSession<'_>) -> Option<TopicMove>,
) -> MatrixMoveResponse {
    let conn = match open_db(db_path) {
        Ok(conn) => conn,
        Err(err) => return MatrixMoveResponse::failure(format!("failed to open matrix db: {err}")),
    };
    let mut session = match load_session(&conn, read_only) {
        Ok(session) => session,
        Err(message) => return MatrixMoveResponse::failure(message),
    };

    let Some(committed) = action(&mut session) else {
        return MatrixMoveResponse::skipped("No change.");
    };
    if let Some(err) = session.take_persist_error() {
        log::warn!("event=ffi_move module=ffi status=error error={err}");
        return MatrixMoveResponse::failure(format!("move not persisted: {err}"));
    }
    MatrixMoveResponse::committed(&committed)
}

fn parse_topic_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid topic id `{raw}`"))
}

fn topics_failure(message: String) -> MatrixTopicsResponse {
    MatrixTopicsResponse {
        ok: false,
        items: Vec::new(),
        message,
    }
}
