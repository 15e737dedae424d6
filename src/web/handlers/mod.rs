//! Page handlers for the Boards site.

pub mod board;
pub mod password_reset;

pub use board::*;
pub use password_reset::*;

use std::sync::Arc;

use axum::response::Html;

use crate::auth::{
    HmacTokenGenerator, PasswordResetService, PasswordResetSettings, TokenGenerator,
};
use crate::config::Config;
use crate::mail::{create_sender, MailSender};
use crate::template::{TemplateContext, TemplateLoader};
use crate::web::error::WebError;
use crate::{Database, Result};

/// Shared application state.
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// Page and mail templates.
    pub templates: Arc<TemplateLoader>,
    /// Outgoing mail backend.
    pub mailer: Arc<dyn MailSender>,
    /// Password reset token generator.
    pub tokens: Arc<dyn TokenGenerator>,
    /// Site details used in pages and reset mail.
    pub site: PasswordResetSettings,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Database,
        templates: TemplateLoader,
        mailer: Arc<dyn MailSender>,
        tokens: Arc<dyn TokenGenerator>,
        site: PasswordResetSettings,
    ) -> Self {
        Self {
            db,
            templates: Arc::new(templates),
            mailer,
            tokens,
            site,
        }
    }

    /// Build the state from configuration.
    pub fn from_config(config: &Config, db: Database) -> Result<Self> {
        let tokens = HmacTokenGenerator::new(
            &config.auth.secret_key,
            config.auth.password_reset_timeout_secs,
        )?;
        let site = PasswordResetSettings {
            site_name: config.site.name.clone(),
            domain: config.site.domain.clone(),
            protocol: config.site.protocol.clone(),
            from_email: config.mail.from_email.clone(),
        };

        Ok(Self::new(
            db,
            TemplateLoader::new(&config.templates.path),
            create_sender(&config.mail)?,
            Arc::new(tokens),
            site,
        ))
    }

    /// Context shared by every page.
    pub fn base_context(&self) -> TemplateContext {
        let mut context = TemplateContext::new();
        context.set("site_name", self.site.site_name.as_str());
        context
    }

    /// Render a page template.
    pub fn render(&self, name: &str, context: &TemplateContext) -> std::result::Result<Html<String>, WebError> {
        self.templates.render(name, context).map(Html).map_err(|e| {
            tracing::error!("Failed to render {}: {}", name, e);
            WebError::internal("An internal error occurred.")
        })
    }

    /// Password reset operations bound to this state.
    pub fn reset_service(&self) -> PasswordResetService<'_> {
        PasswordResetService::new(
            self.db.pool(),
            &self.templates,
            self.mailer.as_ref(),
            self.tokens.as_ref(),
            &self.site,
        )
    }
}
