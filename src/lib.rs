//! Boards - a small discussion forum.
//!
//! Boards hold topics; visitors can browse them and reset a forgotten
//! password through an emailed link.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod mail;
pub mod template;
pub mod web;

pub use auth::{
    decode_uid, encode_uid, hash_password, validate_password, verify_password,
    HmacTokenGenerator, PasswordError, PasswordResetContext, PasswordResetService,
    PasswordResetSettings, TokenGenerator,
};
pub use board::{Board, BoardRepository, NewBoard, NewTopic, Topic, TopicRepository};
pub use config::Config;
pub use db::{Database, DbPool, NewUser, User, UserRepository};
pub use error::{BoardsError, Result};
pub use mail::{EmailMessage, MailSender, Outbox};
pub use template::{TemplateContext, TemplateLoader, Value};
pub use web::{AppState, WebServer};
