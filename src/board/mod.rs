//! Board module for Boards.
//!
//! Boards are discussion categories; each topic belongs to exactly one board.

mod repository;
mod topic_repository;
mod types;

pub use repository::BoardRepository;
pub use topic_repository::TopicRepository;
pub use types::{Board, NewBoard, NewTopic, Topic};
