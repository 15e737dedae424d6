//! User model for Boards.

/// Prefix marking a password hash that can never match.
pub const UNUSABLE_PASSWORD_PREFIX: char = '!';

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, case-insensitive).
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Password hash (Argon2).
    pub password: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// Whether the stored hash can ever verify a password.
    pub fn has_usable_password(&self) -> bool {
        !self.password.is_empty() && !self.password.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
}

impl NewUser {
    /// Create a new user with the required fields.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            password: password.into(),
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> User {
        User {
            id: 1,
            username: "john".to_string(),
            email: Some("john@doe.com".to_string()),
            password: password.to_string(),
            is_active: true,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_has_usable_password() {
        assert!(user_with_password("$argon2id$v=19$...").has_usable_password());
        assert!(!user_with_password("!unusable").has_usable_password());
        assert!(!user_with_password("").has_usable_password());
    }

    #[test]
    fn test_new_user_builder() {
        let user = NewUser::new("john", "hash").with_email("john@doe.com");
        assert_eq!(user.username, "john");
        assert_eq!(user.password, "hash");
        assert_eq!(user.email.as_deref(), Some("john@doe.com"));
    }
}
