//! Board pages.

use axum::{
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use crate::board::{BoardRepository, TopicRepository};
use crate::template::Value;
use crate::web::error::WebError;
use crate::web::handlers::AppState;

/// Parse a primary key path segment. Only ASCII digits are accepted.
pub fn parse_pk(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// GET / - List all boards.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let boards = BoardRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(|e| {
            tracing::error!("Failed to list boards: {}", e);
            WebError::internal("An internal error occurred.")
        })?;

    let mut context = state.base_context();
    context.set("boards", boards.iter().map(Value::from).collect::<Vec<_>>());

    state.render("home.html", &context)
}

/// GET /boards/:id/ - Show a board and its topics.
pub async fn board_topics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let board_id = parse_pk(&id).ok_or_else(|| WebError::not_found("Board not found."))?;

    let board = BoardRepository::new(state.db.pool())
        .get_by_id(board_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get board: {}", e);
            WebError::internal("An internal error occurred.")
        })?
        .ok_or_else(|| WebError::not_found("Board not found."))?;

    let topics = TopicRepository::new(state.db.pool())
        .list_by_board(board.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list topics: {}", e);
            WebError::internal("An internal error occurred.")
        })?;

    let mut context = state.base_context();
    context.set("board", Value::from(&board));
    context.set("topics", topics.iter().map(Value::from).collect::<Vec<_>>());

    state.render("topics.html", &context)
}
