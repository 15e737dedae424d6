//! Test helpers for the web integration tests.
//!
//! Builds the site router on an in-memory database with an outbox mail
//! backend, and provides seeding helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;

use boards::auth::{HmacTokenGenerator, PasswordResetSettings};
use boards::web::create_router;
use boards::{
    hash_password, AppState, Board, BoardRepository, Database, NewBoard, NewTopic, NewUser,
    Outbox, Topic, TopicRepository, User, UserRepository,
};

/// Secret key used to sign reset tokens in tests.
pub const SECRET_KEY: &str = "integration-test-secret-key";

/// Reset link lifetime used in tests.
pub const RESET_TIMEOUT_SECS: u64 = 259_200;

/// Site name used in tests.
pub const SITE_NAME: &str = "Django Boards";

/// Password given to seeded users.
pub const PASSWORD: &str = "123abcdef";

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub outbox: Arc<Outbox>,
}

impl TestApp {
    /// Create a test app with an empty database.
    pub async fn new() -> Self {
        let db = Database::open_in_memory()
            .await
            .expect("Failed to create test database");
        let outbox = Arc::new(Outbox::new());

        let state = AppState::new(
            db.clone(),
            boards::TemplateLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")),
            outbox.clone(),
            Arc::new(token_generator()),
            PasswordResetSettings {
                site_name: SITE_NAME.to_string(),
                domain: "testserver".to_string(),
                protocol: "http".to_string(),
                from_email: "webmaster@localhost".to_string(),
            },
        );

        let server =
            TestServer::new(create_router(Arc::new(state))).expect("Failed to create test server");

        Self { server, db, outbox }
    }

    /// Create a board.
    pub async fn create_board(&self, name: &str, description: &str) -> Board {
        BoardRepository::new(self.db.pool())
            .create(&NewBoard::new(name).with_description(description))
            .await
            .expect("Failed to create board")
    }

    /// Create a user with [`PASSWORD`].
    pub async fn create_user(&self, username: &str, email: &str) -> User {
        let hash = hash_password(PASSWORD).expect("Failed to hash password");
        UserRepository::new(self.db.pool())
            .create(&NewUser::new(username, hash).with_email(email))
            .await
            .expect("Failed to create user")
    }

    /// Create a topic started by `starter`.
    pub async fn create_topic(&self, board: &Board, subject: &str, starter: &User) -> Topic {
        TopicRepository::new(self.db.pool())
            .create(&NewTopic::new(board.id, subject, starter.id))
            .await
            .expect("Failed to create topic")
    }

    /// Reload a user from the database.
    pub async fn reload_user(&self, user: &User) -> User {
        UserRepository::new(self.db.pool())
            .get_by_id(user.id)
            .await
            .expect("Failed to load user")
            .expect("User disappeared")
    }
}

/// Token generator configured like the test app's.
pub fn token_generator() -> HmacTokenGenerator {
    HmacTokenGenerator::new(SECRET_KEY, RESET_TIMEOUT_SECS).expect("Failed to create token generator")
}

/// Extract the `/reset/<uidb64>/<token>/` path from a reset mail body.
pub fn confirm_path_from_body(body: &str) -> Option<String> {
    let start = body.find("http://testserver/reset/")? + "http://testserver".len();
    let rest = &body[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Split a confirm path into `(uidb64, token)`.
pub fn split_confirm_path(path: &str) -> Option<(String, String)> {
    let inner = path.strip_prefix("/reset/")?.strip_suffix('/')?;
    let (uid, token) = inner.split_once('/')?;
    Some((uid.to_string(), token.to_string()))
}
