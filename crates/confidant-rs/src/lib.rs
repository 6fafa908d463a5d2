//! Runtime configuration schema engine with secret-field encryption.
//!
//! Plugin and provider systems describe their configuration shape with a
//! [`SchemaDefinition`] loaded at runtime. The [`SchemaEngine`] validates
//! dynamic value trees against that schema, encrypts secret fields on the
//! way into storage, decrypts them on the way out, and detects forbidden
//! changes to immutable fields before an update is applied.

mod engine;
mod error;

/// Engine façade binding a schema to a cipher.
pub use engine::SchemaEngine;
/// Errors returned by the inbound/outbound processing pipelines.
pub use error::EngineError;

/// Schema model, validator, equality, and immutability diff.
pub use confidant_rs_schema::{
    FieldSchema, FieldType, SchemaDefinition, ValidationReport, deep_equal, deep_equal_opt,
    diff_immutable, validate,
};

/// Cipher boundary and stock implementations.
pub use confidant_rs_crypto::{CipherError, IdentityCipher, PrefixCipher, SecretCipher};
