//! Topic repository for Boards.

use super::types::{NewTopic, Topic};
use crate::db::DbPool;
use crate::{BoardsError, Result};

const TOPIC_SELECT: &str = "SELECT t.id, t.subject, t.board_id, t.starter_id,
        u.username AS starter_username, t.created_at, t.last_updated
     FROM topics t
     JOIN users u ON u.id = t.starter_id";

/// Repository for topic operations.
pub struct TopicRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> TopicRepository<'a> {
    /// Create a new TopicRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new topic.
    ///
    /// Fails with a database error if the board or starter does not exist.
    pub async fn create(&self, new_topic: &NewTopic) -> Result<Topic> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO topics (subject, board_id, starter_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_topic.subject)
        .bind(new_topic.board_id)
        .bind(new_topic.starter_id)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardsError::NotFound("topic".to_string()))
    }

    /// Get a topic by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Topic>> {
        let topic = sqlx::query_as::<_, Topic>(&format!("{TOPIC_SELECT} WHERE t.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(topic)
    }

    /// List the topics of a board, most recently updated first.
    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>(&format!(
            "{TOPIC_SELECT} WHERE t.board_id = ? ORDER BY t.last_updated DESC, t.id DESC"
        ))
        .bind(board_id)
        .fetch_all(self.pool)
        .await?;

        Ok(topics)
    }
}
