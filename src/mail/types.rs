//! Outgoing email message type for Boards.

use chrono::{DateTime, Utc};

use crate::{BoardsError, Result};

/// An outgoing email message.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Single-line subject.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// When the message was composed.
    pub created_at: DateTime<Utc>,
}

impl EmailMessage {
    /// Compose a message.
    ///
    /// Header fields must not contain line breaks and there must be at least
    /// one recipient.
    pub fn new(
        from: impl Into<String>,
        to: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let from = from.into();
        let subject = subject.into();

        if to.is_empty() {
            return Err(BoardsError::Mail("message has no recipients".to_string()));
        }
        if has_line_break(&subject) {
            return Err(BoardsError::Mail(
                "subject must not contain line breaks".to_string(),
            ));
        }
        if has_line_break(&from) || to.iter().any(|addr| has_line_break(addr)) {
            return Err(BoardsError::Mail(
                "address must not contain line breaks".to_string(),
            ));
        }

        Ok(Self {
            from,
            to,
            subject,
            body: body.into(),
            created_at: Utc::now(),
        })
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(|c| c == '\r' || c == '\n')
}
