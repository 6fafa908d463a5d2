//! Error types for the engine façade.

use confidant_rs_crypto::CipherError;
use confidant_rs_schema::ValidationReport;
use thiserror::Error;

/// Errors returned by `process_inbound` and `process_outbound`.
///
/// Host applications convert this into their own domain error with a
/// `From<EngineError>` impl; the `Display` form of a validation failure is
/// the collected messages joined by `", "`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Validation rejected the configuration tree.
    #[error("{0}")]
    Validation(ValidationReport),
    /// The injected cipher failed; the tree walk was aborted and no
    /// partially transformed tree is returned.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

impl EngineError {
    /// Structured access to the validation messages, if this is a
    /// validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(report) => Some(&report.errors),
            Self::Cipher(_) => None,
        }
    }
}

impl From<ValidationReport> for EngineError {
    fn from(report: ValidationReport) -> Self {
        Self::Validation(report)
    }
}
