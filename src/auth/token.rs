//! Password reset tokens.
//!
//! Tokens are stateless: `<timestamp base36>-<mac>`, where the MAC is a
//! truncated HMAC-SHA256 over the user's id, current password hash, the
//! timestamp and the email address. Changing the password invalidates every
//! outstanding token for that user.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::db::User;
use crate::{BoardsError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Domain separation prefix mixed into every MAC.
const KEY_SALT: &str = "boards.auth.token.PasswordResetTokenGenerator";

/// Timestamps count seconds from 2001-01-01T00:00:00Z.
const TOKEN_EPOCH: i64 = 978_307_200;

/// Number of MAC bytes kept in a token.
const MAC_LENGTH: usize = 16;

/// Longest base36 string accepted when decoding (fits in u64).
const MAX_BASE36_LENGTH: usize = 12;

/// Issues and validates password reset tokens.
pub trait TokenGenerator: Send + Sync {
    /// Issue a token for the user.
    fn make_token(&self, user: &User) -> String;

    /// Check whether a token is valid for the user right now.
    fn check_token(&self, user: &User, token: &str) -> bool;
}

/// HMAC-SHA256 token generator keyed by the site secret.
#[derive(Clone)]
pub struct HmacTokenGenerator {
    mac: HmacSha256,
    timeout_secs: u64,
}

impl HmacTokenGenerator {
    /// Create a generator for the given secret key and token lifetime.
    pub fn new(secret_key: &str, timeout_secs: u64) -> Result<Self> {
        if secret_key.is_empty() {
            return Err(BoardsError::Config("secret key must not be empty".to_string()));
        }
        let mac = HmacSha256::new_from_slice(secret_key.as_bytes())
            .map_err(|e| BoardsError::Config(format!("invalid secret key: {e}")))?;

        Ok(Self { mac, timeout_secs })
    }

    /// Issue a token stamped with the given time.
    pub fn make_token_at(&self, user: &User, timestamp: u64) -> String {
        let tag = self.compute(user, timestamp).finalize().into_bytes();
        format!(
            "{}-{}",
            to_base36(timestamp),
            URL_SAFE_NO_PAD.encode(&tag[..MAC_LENGTH])
        )
    }

    /// Check a token against the given current time.
    pub fn check_token_at(&self, user: &User, token: &str, now: u64) -> bool {
        let Some((ts_b36, mac_b64)) = token.split_once('-') else {
            return false;
        };
        let Some(timestamp) = from_base36(ts_b36) else {
            return false;
        };
        let Ok(tag) = URL_SAFE_NO_PAD.decode(mac_b64) else {
            return false;
        };
        if tag.len() != MAC_LENGTH {
            return false;
        }

        if self
            .compute(user, timestamp)
            .verify_truncated_left(&tag)
            .is_err()
        {
            return false;
        }

        now.saturating_sub(timestamp) <= self.timeout_secs
    }

    fn compute(&self, user: &User, timestamp: u64) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(KEY_SALT.as_bytes());
        mac.update(user.id.to_string().as_bytes());
        mac.update(user.password.as_bytes());
        mac.update(timestamp.to_string().as_bytes());
        mac.update(user.email.as_deref().unwrap_or_default().as_bytes());
        mac
    }
}

impl TokenGenerator for HmacTokenGenerator {
    fn make_token(&self, user: &User) -> String {
        self.make_token_at(user, now_secs())
    }

    fn check_token(&self, user: &User, token: &str) -> bool {
        self.check_token_at(user, token, now_secs())
    }
}

/// Seconds elapsed since the token epoch.
pub fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp() - TOKEN_EPOCH).unwrap_or(0)
}

/// Encode a user id for use in a URL.
pub fn encode_uid(id: i64) -> String {
    URL_SAFE_NO_PAD.encode(id.to_string())
}

/// Decode a URL user id produced by [`encode_uid`].
pub fn decode_uid(uidb64: &str) -> Option<i64> {
    let bytes = URL_SAFE_NO_PAD.decode(uidb64).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn from_base36(s: &str) -> Option<u64> {
    if s.is_empty()
        || s.len() > MAX_BASE36_LENGTH
        || !s.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    {
        return None;
    }
    u64::from_str_radix(s, 36).ok()
}
