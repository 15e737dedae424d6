//! Board and topic models for Boards.

use std::collections::HashMap;

use crate::template::Value;

/// Board entity: a named discussion category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Board name (unique).
    pub name: String,
    /// Board description.
    pub description: String,
    /// Board creation timestamp.
    pub created_at: String,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
}

impl NewBoard {
    /// Create a new board with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<&Board> for Value {
    fn from(board: &Board) -> Self {
        let mut map = HashMap::new();
        map.insert("id".to_string(), Value::Number(board.id));
        map.insert("name".to_string(), Value::string(&board.name));
        map.insert("description".to_string(), Value::string(&board.description));
        map.insert("created_at".to_string(), Value::string(&board.created_at));
        Value::Object(map)
    }
}

/// Topic entity: a discussion thread belonging to one board.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Topic {
    /// Unique topic ID.
    pub id: i64,
    /// Topic subject line.
    pub subject: String,
    /// Owning board ID.
    pub board_id: i64,
    /// User who started the topic.
    pub starter_id: i64,
    /// Username of the starter.
    pub starter_username: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last activity timestamp.
    pub last_updated: String,
}

/// Data for creating a new topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
    /// Owning board ID.
    pub board_id: i64,
    /// Topic subject line.
    pub subject: String,
    /// User who starts the topic.
    pub starter_id: i64,
}

impl NewTopic {
    /// Create a new topic.
    pub fn new(board_id: i64, subject: impl Into<String>, starter_id: i64) -> Self {
        Self {
            board_id,
            subject: subject.into(),
            starter_id,
        }
    }
}

impl From<&Topic> for Value {
    fn from(topic: &Topic) -> Self {
        let mut map = HashMap::new();
        map.insert("id".to_string(), Value::Number(topic.id));
        map.insert("subject".to_string(), Value::string(&topic.subject));
        map.insert("board_id".to_string(), Value::Number(topic.board_id));
        map.insert("starter".to_string(), Value::string(&topic.starter_username));
        map.insert("created_at".to_string(), Value::string(&topic.created_at));
        map.insert("last_updated".to_string(), Value::string(&topic.last_updated));
        Value::Object(map)
    }
}
