//! Decode-time configuration.

use serde::{Deserialize, Serialize};

/// Switches for the lenient decode paths of the codec.
///
/// The defaults reproduce the backend client's historical behavior.
///
/// # Example
///
/// ```
/// use lean_types::CodecConfig;
///
/// let config = CodecConfig::new()
///     .with_strict_pointer_fields(true)
///     .with_bare_date_strings(false);
/// assert!(config.strict_pointer_fields);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Reject a `Pointer` object missing `className` or `objectId` instead of
    /// substituting an empty string.
    pub strict_pointer_fields: bool,
    /// Accept a bare ISO string (not a tagged object) where a `Date` is expected.
    pub accept_bare_date_strings: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_pointer_fields: false,
            accept_bare_date_strings: true,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with the default (lenient) behavior.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_pointer_fields(mut self, strict: bool) -> Self {
        self.strict_pointer_fields = strict;
        self
    }

    pub fn with_bare_date_strings(mut self, accept: bool) -> Self {
        self.accept_bare_date_strings = accept;
        self
    }
}
