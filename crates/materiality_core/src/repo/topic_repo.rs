//! Topic repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist categories, topics and the move history produced by committed
//!   matrix edits.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Topics are listed in insertion (`sort_order`) order.
//! - Read paths reject invalid persisted data instead of masking it.
//! - A persisted move updates scores and appends history atomically.

use crate::db::DbError;
use crate::model::category::{Category, CategoryError, CategoryId};
use crate::model::score::{Score, ScorePoint};
use crate::model::topic::{RiskLevel, Topic, TopicId, TopicValidationError};
use crate::store::topic_store::TopicMove;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TOPIC_SELECT_SQL: &str = "SELECT
    topic_id,
    title,
    description,
    category_id,
    impact,
    importance,
    risk_level,
    stakeholders,
    policy_links
FROM topics";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for topic persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TopicId),
    UnknownCategory(CategoryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "topic not found: {id}"),
            Self::UnknownCategory(id) => write!(f, "category not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted topic data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Input channel that produced a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Drag,
    Keyboard,
}

impl MoveSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Keyboard => "keyboard",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "drag" => Some(Self::Drag),
            "keyboard" => Some(Self::Keyboard),
            _ => None,
        }
    }
}

/// One persisted entry of a topic's change history.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub move_id: i64,
    pub topic_id: TopicId,
    pub from: ScorePoint,
    pub to: ScorePoint,
    pub source: MoveSource,
    /// Unix epoch milliseconds.
    pub moved_at: i64,
}

/// Repository interface backing a materiality matrix.
pub trait TopicRepository {
    fn create_category(&self, category: &Category) -> RepoResult<()>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn create_topic(&self, topic: &Topic) -> RepoResult<TopicId>;
    fn get_topic(&self, id: TopicId) -> RepoResult<Option<Topic>>;
    fn list_topics(&self) -> RepoResult<Vec<Topic>>;
    fn update_scores(&self, id: TopicId, position: ScorePoint) -> RepoResult<()>;
    fn record_move(&self, topic_move: &TopicMove, source: MoveSource) -> RepoResult<i64>;
    fn list_moves(&self, id: TopicId) -> RepoResult<Vec<MoveRecord>>;

    /// Writes the new scores and appends the history entry.
    fn persist_move(&self, topic_move: &TopicMove, source: MoveSource) -> RepoResult<i64> {
        self.update_scores(topic_move.id, topic_move.to)?;
        self.record_move(topic_move, source)
    }
}

/// SQLite-backed topic repository.
pub struct SqliteTopicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTopicRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn category_exists(&self, id: &CategoryId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE category_id = ?1);",
            [id.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl TopicRepository for SqliteTopicRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO categories (category_id, name, color) VALUES (?1, ?2, ?3);",
            params![category.id.as_str(), category.name, category.color],
        )?;
        Ok(())
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category_id, name, color FROM categories ORDER BY category_id;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let category = Category::new(&id, row.get::<_, String>(1)?, row.get::<_, String>(2)?)
                .map_err(|err: CategoryError| {
                    RepoError::InvalidData(format!("category `{id}`: {err}"))
                })?;
            categories.push(category);
        }
        Ok(categories)
    }

    fn create_topic(&self, topic: &Topic) -> RepoResult<TopicId> {
        if !self.category_exists(&topic.category)? {
            return Err(RepoError::UnknownCategory(topic.category.clone()));
        }

        self.conn.execute(
            "INSERT INTO topics (
                topic_id,
                title,
                description,
                category_id,
                impact,
                importance,
                risk_level,
                stakeholders,
                policy_links,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9,
                (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM topics));",
            params![
                topic.id.to_string(),
                topic.title,
                topic.description,
                topic.category.as_str(),
                topic.impact.value(),
                topic.importance.value(),
                topic.risk_level.map(RiskLevel::as_str),
                encode_list(&topic.stakeholders)?,
                encode_list(&topic.policy_links)?,
            ],
        )?;
        Ok(topic.id)
    }

    fn get_topic(&self, id: TopicId) -> RepoResult<Option<Topic>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TOPIC_SELECT_SQL} WHERE topic_id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_topic_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_topics(&self) -> RepoResult<Vec<Topic>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TOPIC_SELECT_SQL} ORDER BY sort_order ASC, topic_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut topics = Vec::new();
        while let Some(row) = rows.next()? {
            topics.push(parse_topic_row(row)?);
        }
        Ok(topics)
    }

    fn update_scores(&self, id: TopicId, position: ScorePoint) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE topics
             SET
                impact = ?1,
                importance = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE topic_id = ?3;",
            params![
                position.impact.value(),
                position.importance.value(),
                id.to_string()
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn record_move(&self, topic_move: &TopicMove, source: MoveSource) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO topic_moves (
                topic_id,
                from_importance,
                from_impact,
                to_importance,
                to_impact,
                source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                topic_move.id.to_string(),
                topic_move.from.importance.value(),
                topic_move.from.impact.value(),
                topic_move.to.importance.value(),
                topic_move.to.impact.value(),
                source.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_moves(&self, id: TopicId) -> RepoResult<Vec<MoveRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                move_id,
                topic_id,
                from_importance,
                from_impact,
                to_importance,
                to_impact,
                source,
                moved_at
             FROM topic_moves
             WHERE topic_id = ?1
             ORDER BY move_id ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut moves = Vec::new();
        while let Some(row) = rows.next()? {
            moves.push(parse_move_row(row)?);
        }
        Ok(moves)
    }

    fn persist_move(&self, topic_move: &TopicMove, source: MoveSource) -> RepoResult<i64> {
        let tx = self.conn.unchecked_transaction()?;
        self.update_scores(topic_move.id, topic_move.to)?;
        let move_id = self.record_move(topic_move, source)?;
        tx.commit()?;
        Ok(move_id)
    }
}

fn parse_topic_row(row: &Row<'_>) -> RepoResult<Topic> {
    let id = parse_uuid(row.get("topic_id")?, "topics.topic_id")?;
    let category_text: String = row.get("category_id")?;
    let category = CategoryId::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid category `{category_text}` in topics.category_id"))
    })?;
    let impact = parse_score(row.get("impact")?, "topics.impact")?;
    let importance = parse_score(row.get("importance")?, "topics.importance")?;

    let mut topic = Topic::with_id(
        id,
        row.get::<_, String>("title")?,
        category,
        importance.value(),
        impact.value(),
    )
    .map_err(|err: TopicValidationError| RepoError::InvalidData(format!("topic {id}: {err}")))?;

    topic.description = row.get("description")?;
    topic.risk_level = match row.get::<_, Option<String>>("risk_level")? {
        Some(value) => Some(RiskLevel::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid risk level `{value}` in topics.risk_level"))
        })?),
        None => None,
    };
    topic.stakeholders = decode_list(row.get("stakeholders")?, "topics.stakeholders")?;
    topic.policy_links = decode_list(row.get("policy_links")?, "topics.policy_links")?;
    Ok(topic)
}

fn parse_move_row(row: &Row<'_>) -> RepoResult<MoveRecord> {
    let source_text: String = row.get("source")?;
    let source = MoveSource::parse(&source_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid move source `{source_text}` in topic_moves.source"))
    })?;
    Ok(MoveRecord {
        move_id: row.get("move_id")?,
        topic_id: parse_uuid(row.get("topic_id")?, "topic_moves.topic_id")?,
        from: ScorePoint {
            importance: parse_score(row.get("from_importance")?, "topic_moves.from_importance")?,
            impact: parse_score(row.get("from_impact")?, "topic_moves.from_impact")?,
        },
        to: ScorePoint {
            importance: parse_score(row.get("to_importance")?, "topic_moves.to_importance")?,
            impact: parse_score(row.get("to_impact")?, "topic_moves.to_impact")?,
        },
        source,
        moved_at: row.get("moved_at")?,
    })
}

fn parse_uuid(value: String, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(&value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Out-of-range persisted scores are reported, not clamped.
fn parse_score(value: f64, column: &str) -> RepoResult<Score> {
    if !(0.0..=10.0).contains(&value) {
        return Err(RepoError::InvalidData(format!(
            "score {value} out of range in {column}"
        )));
    }
    Ok(Score::new(value))
}

fn encode_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values)
        .map_err(|err| RepoError::InvalidData(format!("failed to encode list: {err}")))
}

fn decode_list(value: String, column: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(&value)
        .map_err(|err| RepoError::InvalidData(format!("invalid json list in {column}: {err}")))
}
