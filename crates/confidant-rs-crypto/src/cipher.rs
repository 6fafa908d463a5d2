//! Cipher trait and stock implementations.

use crate::CipherError;
use async_trait::async_trait;

/// Encrypt/decrypt pair applied to secret-typed configuration fields.
///
/// Implementations must be safe to call concurrently: the engine may
/// dispatch sibling secrets in parallel and join them positionally.
/// Timeouts and cancellation are the implementation's responsibility.
#[async_trait]
pub trait SecretCipher: Send + Sync {
    /// Encrypt one secret value before it is persisted.
    async fn encrypt(&self, plaintext: &str) -> Result<String, CipherError>;

    /// Decrypt one stored secret value back to its logical form.
    async fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError>;
}

/// Cipher that stores secrets verbatim.
///
/// Default binding when no provider is configured; useful for local
/// development where at-rest encryption is not required.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCipher;

#[async_trait]
impl SecretCipher for IdentityCipher {
    async fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        Ok(plaintext.to_string())
    }

    async fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        Ok(ciphertext.to_string())
    }
}

/// Cipher that tags values with a fixed prefix.
///
/// This is obfuscation, not encryption; it exists for demos and tests that
/// need a visible, reversible transformation. Decrypting a value that does
/// not carry the prefix fails, which doubles as a double-encryption guard.
#[derive(Debug, Clone)]
pub struct PrefixCipher {
    /// Prefix prepended on encrypt and stripped on decrypt.
    prefix: String,
}

impl PrefixCipher {
    /// Build a cipher around the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl SecretCipher for PrefixCipher {
    async fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        Ok(format!("{}{}", self.prefix, plaintext))
    }

    async fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        ciphertext
            .strip_prefix(self.prefix.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| CipherError::Decrypt("value does not carry the expected prefix".into()))
    }
}
