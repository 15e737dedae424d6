//! Password reset flow.
//!
//! `request_reset` mails a confirmation link to every active account using
//! the submitted address; `resolve_user` and `set_password` back the
//! confirmation page the link points at.

use tracing::{error, info, warn};

use super::password::hash_password;
use super::token::{decode_uid, encode_uid, TokenGenerator};
use crate::db::{DbPool, User, UserRepository};
use crate::mail::{EmailMessage, MailSender};
use crate::template::{TemplateContext, TemplateLoader};
use crate::{BoardsError, Result};

/// Template rendering the email subject.
pub const SUBJECT_TEMPLATE: &str = "registration/password_reset_subject.txt";

/// Template rendering the email body.
pub const EMAIL_TEMPLATE: &str = "registration/password_reset_email.txt";

/// Path of the confirmation page for a `(uidb64, token)` pair.
pub fn reset_confirm_path(uidb64: &str, token: &str) -> String {
    format!("/reset/{uidb64}/{token}/")
}

/// Site details mixed into reset emails.
#[derive(Debug, Clone)]
pub struct PasswordResetSettings {
    /// Product name shown in the subject.
    pub site_name: String,
    /// Host (and port) used in the link.
    pub domain: String,
    /// "http" or "https".
    pub protocol: String,
    /// Sender address.
    pub from_email: String,
}

/// What was mailed to one account.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordResetContext {
    /// Encoded user id.
    pub uid: String,
    /// Reset token.
    pub token: String,
    /// Account username.
    pub username: String,
    /// Address the mail was sent to.
    pub email: String,
}

impl PasswordResetContext {
    /// Path of the confirmation page for this reset.
    pub fn confirm_path(&self) -> String {
        reset_confirm_path(&self.uid, &self.token)
    }
}

/// Password reset operations.
pub struct PasswordResetService<'a> {
    pool: &'a DbPool,
    templates: &'a TemplateLoader,
    mailer: &'a dyn MailSender,
    tokens: &'a dyn TokenGenerator,
    settings: &'a PasswordResetSettings,
}

impl<'a> PasswordResetService<'a> {
    /// Create a new PasswordResetService.
    pub fn new(
        pool: &'a DbPool,
        templates: &'a TemplateLoader,
        mailer: &'a dyn MailSender,
        tokens: &'a dyn TokenGenerator,
        settings: &'a PasswordResetSettings,
    ) -> Self {
        Self {
            pool,
            templates,
            mailer,
            tokens,
            settings,
        }
    }

    /// Send a reset link to every active account registered with `email`.
    ///
    /// Accounts without a usable password are skipped. An unknown address
    /// sends nothing and is not an error. Delivery failures are logged and
    /// the remaining accounts are still processed.
    pub async fn request_reset(&self, email: &str) -> Result<Vec<PasswordResetContext>> {
        let users = UserRepository::new(self.pool)
            .list_active_by_email(email)
            .await?;

        let mut sent = Vec::new();
        for user in users.iter().filter(|u| u.has_usable_password()) {
            let Some(address) = user.email.as_deref() else {
                continue;
            };

            let reset = PasswordResetContext {
                uid: encode_uid(user.id),
                token: self.tokens.make_token(user),
                username: user.username.clone(),
                email: address.to_string(),
            };
            let message = self.compose(&reset)?;

            match self.mailer.send(&message) {
                Ok(()) => {
                    info!(user_id = user.id, "Password reset email sent");
                    sent.push(reset);
                }
                Err(e) => {
                    error!(user_id = user.id, error = %e, "Failed to send password reset email");
                }
            }
        }

        if sent.is_empty() {
            info!("Password reset requested for an address with no eligible account");
        }

        Ok(sent)
    }

    fn compose(&self, reset: &PasswordResetContext) -> Result<EmailMessage> {
        let mut context = TemplateContext::new();
        context.set("site_name", self.settings.site_name.as_str());
        context.set("domain", self.settings.domain.as_str());
        context.set("protocol", self.settings.protocol.as_str());
        context.set("email", reset.email.as_str());
        context.set("username", reset.username.as_str());
        context.set("uid", reset.uid.as_str());
        context.set("token", reset.token.as_str());
        context.set("confirm_path", reset.confirm_path());

        // The subject must be a single header line.
        let subject: String = self
            .templates
            .render(SUBJECT_TEMPLATE, &context)?
            .lines()
            .collect();
        let body = self.templates.render(EMAIL_TEMPLATE, &context)?;

        EmailMessage::new(
            self.settings.from_email.as_str(),
            vec![reset.email.clone()],
            subject,
            body,
        )
    }

    /// Look up the user a reset link belongs to.
    ///
    /// Returns `None` when the uid is malformed, the user is unknown, or the
    /// token does not validate.
    pub async fn resolve_user(&self, uidb64: &str, token: &str) -> Result<Option<User>> {
        let Some(user_id) = decode_uid(uidb64) else {
            return Ok(None);
        };
        let Some(user) = UserRepository::new(self.pool).get_by_id(user_id).await? else {
            return Ok(None);
        };

        if self.tokens.check_token(&user, token) {
            Ok(Some(user))
        } else {
            warn!(user_id, "Invalid or expired password reset token");
            Ok(None)
        }
    }

    /// Store a new password for the user.
    pub async fn set_password(&self, user: &User, new_password: &str) -> Result<()> {
        let hash =
            hash_password(new_password).map_err(|e| BoardsError::Validation(e.to_string()))?;

        let updated = UserRepository::new(self.pool)
            .set_password(user.id, &hash)
            .await?;
        if !updated {
            return Err(BoardsError::NotFound("user".to_string()));
        }

        info!(user_id = user.id, "Password reset completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::auth::token::HmacTokenGenerator;
    use crate::auth::verify_password;
    use crate::db::{Database, NewUser};
    use crate::mail::Outbox;

    struct Fixture {
        db: Database,
        templates: TemplateLoader,
        outbox: Outbox,
        tokens: HmacTokenGenerator,
        settings: PasswordResetSettings,
    }

    impl Fixture {
        async fn new() -> Self {
            let templates =
                TemplateLoader::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"));
            Self {
                db: Database::open_in_memory().await.unwrap(),
                templates,
                outbox: Outbox::new(),
                tokens: HmacTokenGenerator::new("unit-test-secret-key-000", 3600).unwrap(),
                settings: PasswordResetSettings {
                    site_name: "Django Boards".to_string(),
                    domain: "testserver".to_string(),
                    protocol: "http".to_string(),
                    from_email: "webmaster@localhost".to_string(),
                },
            }
        }

        fn service(&self) -> PasswordResetService<'_> {
            PasswordResetService::new(
                self.db.pool(),
                &self.templates,
                &self.outbox,
                &self.tokens,
                &self.settings,
            )
        }

        async fn add_user(&self, username: &str, email: &str) -> User {
            let hash = hash_password("old_password_123").unwrap();
            UserRepository::new(self.db.pool())
                .create(&NewUser::new(username, hash).with_email(email))
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn test_request_reset_sends_one_mail() {
        let fx = Fixture::new().await;
        fx.add_user("john", "john@doe.com").await;

        let sent = fx.service().request_reset("john@doe.com").await.unwrap();
        assert_eq!(sent.len(), 1);

        let messages = fx.outbox.messages();
        assert_eq!(messages.len(), 1);
        let mail = &messages[0];
        assert_eq!(mail.subject, "[Django Boards] Please reset your password");
        assert_eq!(mail.to, vec!["john@doe.com".to_string()]);
        assert_eq!(mail.from, "webmaster@localhost");
        assert!(mail.body.contains("john"));
        assert!(mail.body.contains("john@doe.com"));
        assert!(mail
            .body
            .contains(&format!("http://testserver{}", sent[0].confirm_path())));
    }

    #[tokio::test]
    async fn test_request_reset_matches_case_insensitively() {
        let fx = Fixture::new().await;
        fx.add_user("john", "john@doe.com").await;

        let sent = fx.service().request_reset("JOHN@DOE.COM").await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(fx.outbox.messages()[0].to, vec!["john@doe.com".to_string()]);
    }

    #[tokio::test]
    async fn test_request_reset_unknown_email() {
        let fx = Fixture::new().await;
        fx.add_user("john", "john@doe.com").await;

        let sent = fx.service().request_reset("nobody@doe.com").await.unwrap();
        assert!(sent.is_empty());
        assert!(fx.outbox.is_empty());
    }

    #[tokio::test]
    async fn test_request_reset_skips_inactive_and_unusable() {
        let fx = Fixture::new().await;
        let repo = UserRepository::new(fx.db.pool());
        let inactive = fx.add_user("inactive", "shared@doe.com").await;
        repo.set_active(inactive.id, false).await.unwrap();
        repo.create(&NewUser::new("unusable", "!locked").with_email("shared@doe.com"))
            .await
            .unwrap();
        fx.add_user("active", "shared@doe.com").await;

        let sent = fx.service().request_reset("shared@doe.com").await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].username, "active");
        assert_eq!(fx.outbox.len(), 1);
    }

    #[tokio::test]
    async fn test_request_reset_mails_each_account() {
        let fx = Fixture::new().await;
        fx.add_user("first", "family@doe.com").await;
        fx.add_user("second", "family@doe.com").await;

        let sent = fx.service().request_reset("family@doe.com").await.unwrap();
        let usernames: Vec<_> = sent.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(usernames, vec!["first", "second"]);
        assert_eq!(fx.outbox.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_user() {
        let fx = Fixture::new().await;
        let user = fx.add_user("john", "john@doe.com").await;
        let sent = fx.service().request_reset("john@doe.com").await.unwrap();

        let resolved = fx
            .service()
            .resolve_user(&sent[0].uid, &sent[0].token)
            .await
            .unwrap();
        assert_eq!(resolved.map(|u| u.id), Some(user.id));

        let service = fx.service();
        assert!(service.resolve_user("!!", &sent[0].token).await.unwrap().is_none());
        assert!(service
            .resolve_user(&encode_uid(999), &sent[0].token)
            .await
            .unwrap()
            .is_none());
        assert!(service
            .resolve_user(&sent[0].uid, "1-AAAAAAAAAAAAAAAAAAAAAA")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_set_password_consumes_token() {
        let fx = Fixture::new().await;
        fx.add_user("john", "john@doe.com").await;
        let sent = fx.service().request_reset("john@doe.com").await.unwrap();
        let service = fx.service();

        let user = service
            .resolve_user(&sent[0].uid, &sent[0].token)
            .await
            .unwrap()
            .unwrap();
        service.set_password(&user, "new_password_456").await.unwrap();

        let stored = UserRepository::new(fx.db.pool())
            .get_by_id(user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password("new_password_456", &stored.password).is_ok());
        assert!(service
            .resolve_user(&sent[0].uid, &sent[0].token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_set_password_rejects_short() {
        let fx = Fixture::new().await;
        let user = fx.add_user("john", "john@doe.com").await;

        let result = fx.service().set_password(&user, "short").await;
        assert!(matches!(result, Err(BoardsError::Validation(_))));
    }

    #[test]
    fn test_confirm_path() {
        let reset = PasswordResetContext {
            uid: "MQ".to_string(),
            token: "abc-def".to_string(),
            username: "john".to_string(),
            email: "john@doe.com".to_string(),
        };
        assert_eq!(reset.confirm_path(), "/reset/MQ/abc-def/");
    }
}
