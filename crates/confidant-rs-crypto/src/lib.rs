//! Crypto boundary for secret-typed configuration fields.
//!
//! The engine never touches key material itself; it calls an injected
//! [`SecretCipher`] for every secret leaf. Implementations range from the
//! no-op [`IdentityCipher`] default to remote KMS providers.

mod cipher;
mod error;

/// Cipher trait and stock implementations.
pub use cipher::{IdentityCipher, PrefixCipher, SecretCipher};
/// Opaque cipher failure surfaced to engine callers.
pub use error::CipherError;
