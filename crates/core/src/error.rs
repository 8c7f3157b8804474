//! Error types for core contact types

use thiserror::Error;

/// Failure to parse an enumerated contact detail from its text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value: '{value}'")]
pub struct ParseEnumError {
    /// Name of the enumeration being parsed (e.g. "gender")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
