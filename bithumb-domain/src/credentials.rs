//! Exchange Credentials
//!
//! API key pair used to sign private requests.
//!
//! # Security Model
//!
//! - Held in memory only; never persisted or serialized
//! - The secret key is wiped when dropped
//! - `Debug` output never shows the secret

use std::fmt;
use zeroize::{Zeroize, Zeroizing};

use crate::value_objects::DomainError;

/// Bithumb API credentials (in-memory only, never persisted).
pub struct Credentials {
    /// Connect key (public identifier, sent as `Api-Key`)
    connect_key: String,
    /// Secret key (HMAC key, never transmitted)
    secret_key: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from a connect key and secret key.
    ///
    /// # Errors
    /// Returns `DomainError::MissingCredential` if either key is empty
    pub fn new(
        connect_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let connect_key = connect_key.into();
        let secret_key = Zeroizing::new(secret_key.into());

        if connect_key.trim().is_empty() {
            return Err(DomainError::MissingCredential("connect_key"));
        }
        if secret_key.trim().is_empty() {
            return Err(DomainError::MissingCredential("secret_key"));
        }

        Ok(Self {
            connect_key,
            secret_key,
        })
    }

    /// Connect key, sent in the clear as a header.
    pub fn connect_key(&self) -> &str {
        &self.connect_key
    }

    /// Secret key bytes for signing.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("connect_key", &self.connect_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Zeroize for Credentials {
    fn zeroize(&mut self) {
        self.connect_key.zeroize();
        self.secret_key.zeroize();
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.zeroize();
    }
}
