//! Error types for Boards.

use thiserror::Error;

/// Common error type for Boards.
#[derive(Error, Debug)]
pub enum BoardsError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] crate::template::TemplateError),

    /// Outgoing mail error.
    #[error("mail error: {0}")]
    Mail(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BoardsError {
    fn from(e: sqlx::Error) -> Self {
        BoardsError::Database(e.to_string())
    }
}

/// Result type alias for Boards operations.
pub type Result<T> = std::result::Result<T, BoardsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = BoardsError::Auth("invalid token".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid token");
    }

    #[test]
    fn test_validation_error_display() {
        let err = BoardsError::Validation("password too short".to_string());
        assert_eq!(err.to_string(), "validation error: password too short");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = BoardsError::NotFound("board".to_string());
        assert_eq!(err.to_string(), "board not found");
    }

    #[test]
    fn test_mail_error_display() {
        let err = BoardsError::Mail("no recipients".to_string());
        assert_eq!(err.to_string(), "mail error: no recipients");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BoardsError = io_err.into();
        assert!(matches!(err, BoardsError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_template_error_conversion() {
        let err: BoardsError = crate::template::TemplateError::NotFound("home.html".into()).into();
        assert!(matches!(err, BoardsError::Template(_)));
        assert!(err.to_string().contains("home.html"));
    }
}
