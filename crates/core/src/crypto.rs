//! Fernet token cipher for the `tenant.hey_key` column.
//!
//! Tokens are standard Fernet (AES-128-CBC + HMAC-SHA256, url-safe base64)
//! so rows written by other registry tooling decrypt unchanged.

use fernet::Fernet;

use crate::error::CoreError;

/// Reference time passed to Fernet when no TTL applies. Far enough ahead
/// that tokens stamped by a host with a fast clock are still accepted.
const NO_TTL_REFERENCE_TIME: u64 = u64::MAX / 2;

/// Errors from decrypting a single stored token.
#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    /// The token is malformed, was signed with another key, or was tampered with.
    #[error("Token is invalid or was encrypted with a different key")]
    InvalidToken,

    /// The token decrypted but the plaintext is not UTF-8.
    #[error("Decrypted token is not valid UTF-8")]
    NotUtf8,
}

/// Process-wide symmetric cipher built from `FERNET_KEY`.
pub struct TokenCipher {
    fernet: Fernet,
}

impl TokenCipher {
    /// Build a cipher from a url-safe base64 encoded 32-byte key.
    pub fn new(key: &str) -> Result<Self, CoreError> {
        let fernet = Fernet::new(key.trim()).ok_or_else(|| {
            CoreError::InvalidKey("expected 32 url-safe base64 encoded bytes".to_string())
        })?;
        Ok(Self { fernet })
    }

    /// Generate a fresh random key suitable for [`TokenCipher::new`].
    pub fn generate_key() -> String {
        Fernet::generate_key()
    }

    /// Encrypt `plaintext` into a Fernet token.
    pub fn encrypt(&self, plaintext: &str) -> String {
        self.fernet.encrypt(plaintext.as_bytes())
    }

    /// Decrypt a Fernet token back into its UTF-8 plaintext.
    ///
    /// Tokens never expire and their timestamp is not compared with the
    /// local clock.
    pub fn decrypt(&self, token: &str) -> Result<String, DecryptError> {
        let bytes = self
            .fernet
            .decrypt_at_time(token.trim(), None, NO_TTL_REFERENCE_TIME)
            .map_err(|_| DecryptError::InvalidToken)?;
        String::from_utf8(bytes).map_err(|_| DecryptError::NotUtf8)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
