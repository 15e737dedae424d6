//! Middleware for the Boards site.

pub mod security;

pub use security::security_headers;
