//! Board repository for Boards.

use super::types::{Board, NewBoard};
use crate::db::DbPool;
use crate::{BoardsError, Result};

/// Repository for board operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board in the database.
    ///
    /// Returns the created board with the assigned ID.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (name, description) VALUES (?, ?) RETURNING id",
        )
        .bind(&new_board.name)
        .bind(&new_board.description)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardsError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(board)
    }

    /// List every board, ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(boards)
    }
}
