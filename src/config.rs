//! Configuration module for Boards.

use serde::Deserialize;
use std::path::Path;

use crate::{BoardsError, Result};

/// Minimum accepted length of the secret key used to sign reset tokens.
pub const MIN_SECRET_KEY_LENGTH: usize = 16;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/boards.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Site information used in pages and outgoing mail.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Product name shown in page titles and mail subjects.
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Public domain (with port, if any) used to build absolute links.
    #[serde(default = "default_site_domain")]
    pub domain: String,
    /// URL scheme used to build absolute links (http / https).
    #[serde(default = "default_site_protocol")]
    pub protocol: String,
}

fn default_site_name() -> String {
    "Django Boards".to_string()
}

fn default_site_domain() -> String {
    "localhost:8000".to_string()
}

fn default_site_protocol() -> String {
    "http".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            domain: default_site_domain(),
            protocol: default_site_protocol(),
        }
    }
}

/// Templates configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Path to the templates directory.
    #[serde(default = "default_templates_path")]
    pub path: String,
}

fn default_templates_path() -> String {
    "templates".to_string()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: default_templates_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file output.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/boards.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Outgoing mail configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Mail backend (console / memory).
    #[serde(default = "default_mail_backend")]
    pub backend: String,
    /// Sender address for outgoing mail.
    #[serde(default = "default_from_email")]
    pub from_email: String,
}

fn default_mail_backend() -> String {
    "console".to_string()
}

fn default_from_email() -> String {
    "webmaster@localhost".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            backend: default_mail_backend(),
            from_email: default_from_email(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key used to sign password reset tokens (must be set).
    #[serde(default)]
    pub secret_key: String,
    /// Lifetime of a password reset link in seconds.
    #[serde(default = "default_reset_timeout")]
    pub password_reset_timeout_secs: u64,
}

fn default_reset_timeout() -> u64 {
    259_200 // 3 days
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            password_reset_timeout_secs: default_reset_timeout(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Site information.
    #[serde(default)]
    pub site: SiteConfig,
    /// Templates configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardsError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardsError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BOARDS_SECRET_KEY`: Override the token signing secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("BOARDS_SECRET_KEY") {
            if !secret.is_empty() {
                self.auth.secret_key = secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(BoardsError::Config(format!(
                "secret_key must be at least {MIN_SECRET_KEY_LENGTH} characters. \
                 Set it in config.toml or via BOARDS_SECRET_KEY environment variable."
            )));
        }
        if self.auth.password_reset_timeout_secs == 0 {
            return Err(BoardsError::Config(
                "password_reset_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !matches!(self.site.protocol.as_str(), "http" | "https") {
            return Err(BoardsError::Config(format!(
                "unsupported site protocol: {}",
                self.site.protocol
            )));
        }
        Ok(())
    }
}
