//! Mail module for Boards.
//!
//! Outgoing email: the message type and the delivery backends.

mod sender;
mod types;

pub use sender::{create_sender, ConsoleMailer, MailSender, Outbox};
pub use types::EmailMessage;
