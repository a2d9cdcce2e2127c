//! The closed set of `__type` tags understood by the codec.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the discriminator field carried by every tagged object.
pub const TYPE_FIELD: &str = "__type";

/// Discriminator of a tagged LeanCloud value.
///
/// Serializes as the exact wire string (`"Pointer"`, `"File"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Pointer,
    File,
    Bytes,
    Date,
    /// Returned by the backend for relation fields. Encode-only.
    Relation,
}

impl TypeTag {
    /// All tags, in wire-documentation order.
    pub const ALL: [TypeTag; 5] = [
        TypeTag::Pointer,
        TypeTag::File,
        TypeTag::Bytes,
        TypeTag::Date,
        TypeTag::Relation,
    ];

    /// The exact string written to the `__type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Pointer => "Pointer",
            TypeTag::File => "File",
            TypeTag::Bytes => "Bytes",
            TypeTag::Date => "Date",
            TypeTag::Relation => "Relation",
        }
    }

    /// Whether values with this tag can be produced by decoding.
    pub fn is_decodable(&self) -> bool {
        !matches!(self, TypeTag::Relation)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    // Tags are case-sensitive on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown __type: {s}"))
    }
}
