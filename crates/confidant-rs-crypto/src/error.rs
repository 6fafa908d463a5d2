//! Error type for cipher implementations.

use thiserror::Error;

/// Errors returned by secret ciphers.
///
/// The engine treats these as opaque: it never interprets or retries a
/// cipher failure, it aborts the tree walk and surfaces the error as-is.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Encrypting a secret value failed.
    #[error("encrypt failed: {0}")]
    Encrypt(String),
    /// Decrypting a secret value failed.
    #[error("decrypt failed: {0}")]
    Decrypt(String),
}
