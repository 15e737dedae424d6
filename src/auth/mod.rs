//! Authentication module for Boards.
//!
//! This module provides password hashing, password reset tokens and the
//! password reset flow.

mod password;
pub mod reset;
pub mod token;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use reset::{
    reset_confirm_path, PasswordResetContext, PasswordResetService, PasswordResetSettings,
};
pub use token::{decode_uid, encode_uid, HmacTokenGenerator, TokenGenerator};
