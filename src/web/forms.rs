//! HTML form payloads for the password reset pages.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// `POST /reset/` form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PasswordResetForm {
    /// Address to send the reset link to.
    #[serde(default)]
    #[validate(
        length(min = 1, max = 254, message = "Enter a valid email address."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
}

impl PasswordResetForm {
    /// Submitted address with surrounding whitespace removed.
    pub fn cleaned(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

/// `POST /reset/:uidb64/:token/` form.
///
/// The length bounds match `auth::MIN_PASSWORD_LENGTH` and `auth::MAX_PASSWORD_LENGTH`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SetPasswordForm {
    /// New password.
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters."
    ))]
    pub new_password1: String,

    /// New password, again.
    #[serde(default)]
    #[validate(must_match(
        other = "new_password1",
        message = "The two password fields didn't match."
    ))]
    pub new_password2: String,
}

/// Flatten validation errors into display messages, ordered by field name.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages = Vec::new();
    for (field, field_errors) in fields {
        for e in field_errors.iter() {
            let message = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {field}"));
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_form_valid() {
        let form = PasswordResetForm {
            email: "john@doe.com".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reset_form_invalid_email() {
        for email in ["", "not-an-email", "john@"] {
            let form = PasswordResetForm {
                email: email.to_string(),
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(error_messages(&errors), vec!["Enter a valid email address."]);
        }
    }

    #[test]
    fn test_reset_form_cleaned() {
        let form = PasswordResetForm {
            email: "  john@doe.com \n".to_string(),
        }
        .cleaned();
        assert_eq!(form.email, "john@doe.com");
    }

    #[test]
    fn test_set_password_form_valid() {
        let form = SetPasswordForm {
            new_password1: "new_password_123".to_string(),
            new_password2: "new_password_123".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_set_password_form_mismatch() {
        let form = SetPasswordForm {
            new_password1: "new_password_123".to_string(),
            new_password2: "new_password_456".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            error_messages(&errors),
            vec!["The two password fields didn't match."]
        );
    }

    #[test]
    fn test_set_password_form_too_short() {
        let form = SetPasswordForm {
            new_password1: "short".to_string(),
            new_password2: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            error_messages(&errors),
            vec!["Password must be between 8 and 128 characters."]
        );
    }
}
