//! Error pages for the Boards site.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::BoardsError;

/// Error categories shown to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Not found (404).
    NotFound,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "Page not found",
            ErrorCode::UnprocessableEntity => "Invalid request",
            ErrorCode::InternalError => "Server Error",
        }
    }
}

/// Web error rendered as an HTML page.
#[derive(Debug)]
pub struct WebError {
    code: ErrorCode,
    message: String,
}

impl WebError {
    /// Create a new web error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an unprocessable entity error.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message shown on the page.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let title = self.code.title();
        let body = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n<h1>{title}</h1>\n<p>{}</p>\n</body>\n</html>\n",
            html_escape::encode_text(&self.message)
        );
        (self.code.status_code(), Html(body)).into_response()
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for WebError {}

impl From<BoardsError> for WebError {
    fn from(err: BoardsError) -> Self {
        match &err {
            BoardsError::NotFound(what) => WebError::not_found(format!("The requested {what} does not exist.")),
            BoardsError::Validation(msg) => WebError::unprocessable(msg.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                WebError::internal("An internal error occurred.")
            }
        }
    }
}
