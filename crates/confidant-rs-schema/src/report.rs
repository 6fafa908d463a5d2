//! Batched validation outcome with path-qualified messages.

use std::fmt;

/// Accumulated validation errors for one validate or diff call.
///
/// Errors are ordered by schema traversal; duplicates are possible when
/// distinct problems exist at different paths. An empty report means the
/// value tree satisfied the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Human-readable, path-qualified messages in traversal order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Create an empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the checked tree satisfied every constraint.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append one error message.
    pub(crate) fn push(&mut self, message: String) {
        self.errors.push(message);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Display joins messages in order for generic error surfaces.
    #[test]
    fn display_joins_errors() {
        let mut report = ValidationReport::new();
        report.push("name is required".to_string());
        report.push("port must be a number".to_string());
        assert!(!report.is_valid());
        assert_eq!(
            report.to_string(),
            "name is required, port must be a number"
        );
    }

    /// A fresh report is valid.
    #[test]
    fn empty_report_is_valid() {
        assert!(ValidationReport::new().is_valid());
    }
}
