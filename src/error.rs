//! Error types for lean-types crate.

use crate::kind::TypeTag;
use thiserror::Error;

/// Errors that can occur while decoding a tagged LeanCloud value.
///
/// Encoding has no error path; every variant here is produced by the
/// reverse (JSON → value) direction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeanTypesError {
    /// The input is not valid JSON, a field is not a string, or a base64 or
    /// date payload failed to parse.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Type mismatch: expected __type '{expected}', found {}", display_found(.found))]
    TypeMismatch {
        expected: TypeTag,
        found: Option<String>,
    },

    #[error("Missing required field '{field}' for __type '{tag}'")]
    MissingField { tag: TypeTag, field: &'static str },

    #[error("Unknown __type: {}", display_found(.0))]
    UnknownTag(Option<String>),

    #[error("__type '{0}' is encode-only and cannot be decoded")]
    EncodeOnly(TypeTag),
}

fn display_found(found: &Option<String>) -> String {
    match found {
        Some(tag) => format!("'{tag}'"),
        None => "no __type field".to_string(),
    }
}

impl LeanTypesError {
    pub(crate) fn malformed(err: impl std::fmt::Display) -> Self {
        LeanTypesError::MalformedInput(err.to_string())
    }
}

/// Result type alias for lean-types operations.
pub type Result<T> = std::result::Result<T, LeanTypesError>;
