//! Mail delivery backends for Boards.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use super::types::EmailMessage;
use crate::config::MailConfig;
use crate::{BoardsError, Result};

/// Delivers outgoing email.
pub trait MailSender: Send + Sync {
    /// Send one message.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// In-memory backend that keeps every sent message.
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Mutex<Vec<EmailMessage>>,
}

impl Outbox {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EmailMessage>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the messages sent so far, oldest first.
    pub fn messages(&self) -> Vec<EmailMessage> {
        self.lock().clone()
    }

    /// Number of messages sent.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no message has been sent.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl MailSender for Outbox {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        self.lock().push(message.clone());
        Ok(())
    }
}

/// Backend that writes messages to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMailer;

impl MailSender for ConsoleMailer {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            from = %message.from,
            to = %message.to.join(", "),
            subject = %message.subject,
            "outgoing mail\n{}",
            message.body
        );
        Ok(())
    }
}

/// Build the backend selected by `mail.backend` ("console" or "memory").
pub fn create_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>> {
    match config.backend.as_str() {
        "console" => Ok(Arc::new(ConsoleMailer)),
        "memory" => Ok(Arc::new(Outbox::new())),
        other => Err(BoardsError::Config(format!("unknown mail backend: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage::new("webmaster@localhost", vec![to.to_string()], "Hi", "Body").unwrap()
    }

    #[test]
    fn test_outbox_collects_messages() {
        let outbox = Outbox::new();
        assert!(outbox.is_empty());

        outbox.send(&message("a@example.com")).unwrap();
        outbox.send(&message("b@example.com")).unwrap();

        assert_eq!(outbox.len(), 2);
        let messages = outbox.messages();
        assert_eq!(messages[0].to, vec!["a@example.com".to_string()]);
        assert_eq!(messages[1].to, vec!["b@example.com".to_string()]);
    }

    #[test]
    fn test_console_mailer_accepts_message() {
        assert!(ConsoleMailer.send(&message("a@example.com")).is_ok());
    }

    #[test]
    fn test_create_sender() {
        let mut config = MailConfig::default();
        assert!(create_sender(&config).is_ok());

        config.backend = "memory".to_string();
        assert!(create_sender(&config).is_ok());

        config.backend = "smtp".to_string();
        assert!(matches!(create_sender(&config), Err(BoardsError::Config(_))));
    }
}
