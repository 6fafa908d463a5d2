//! Schema model and validation for dynamic configuration trees.
//!
//! This crate owns the field schema data model, the recursive validator,
//! deep structural equality, and the immutability diff used when applying
//! updates to existing configuration records.

mod equality;
mod immutable;
mod model;
mod report;
mod validate;

/// Deep structural equality over configuration value trees.
pub use equality::{deep_equal, deep_equal_opt};
/// Immutability diff between a stored and a proposed configuration.
pub use immutable::diff_immutable;
/// Field schema model types.
pub use model::{FieldSchema, FieldType, SchemaDefinition};
/// Batched, path-qualified validation outcome.
pub use report::ValidationReport;
/// Recursive schema validator.
pub use validate::validate;
