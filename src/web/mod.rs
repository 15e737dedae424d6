//! Web module for Boards.
//!
//! Server-rendered HTML pages: the board list, a board's topics, and the
//! password reset flow.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::WebError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
