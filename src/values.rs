//! Value types carried by the LeanCloud JSON dialect.
//!
//! Each struct is one variant of the closed [`LeanValue`] sum type. Values are
//! plain data: construct them, compare them, hand them to
//! [`crate::forward`] or get them back from [`crate::reverse`].

use crate::error::LeanTypesError;
use crate::kind::TypeTag;
use chrono::{DateTime, TimeDelta, Timelike, Utc};

/// `chrono` format of the `iso` field: fixed three-digit milliseconds, literal `Z`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Reference to a remote object by class name and object id.
///
/// ```json
/// {"__type": "Pointer", "className": "Post", "objectId": "55a39634e4b0ed48f0c1845c"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeanPointer {
    pub class_name: String,
    pub object_id: String,
}

impl LeanPointer {
    pub const TAG: TypeTag = TypeTag::Pointer;

    pub fn new(class_name: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            object_id: object_id.into(),
        }
    }
}

/// Reference to a stored file by id.
///
/// ```json
/// {"__type": "File", "id": "543cbaede4b07db196f50f3c"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeanFile {
    pub id: String,
}

impl LeanFile {
    pub const TAG: TypeTag = TypeTag::File;

    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Opaque byte payload, carried as standard base64 on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeanBytes {
    bytes: Vec<u8>,
}

impl LeanBytes {
    pub const TAG: TypeTag = TypeTag::Bytes;

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for LeanBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for LeanBytes {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

/// A UTC instant, carried on the wire with millisecond precision.
///
/// The full precision of the instant is kept in memory; encoding truncates
/// to milliseconds (see [`LeanDate::truncated`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeanDate {
    instant: DateTime<Utc>,
}

impl LeanDate {
    pub const TAG: TypeTag = TypeTag::Date;

    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The instant truncated (not rounded) to whole milliseconds.
    ///
    /// This is exactly the value a decode of the encoded form yields.
    pub fn truncated(&self) -> LeanDate {
        let sub_millis = self.instant.nanosecond() % 1_000_000;
        LeanDate {
            instant: self.instant - TimeDelta::nanoseconds(i64::from(sub_millis)),
        }
    }
}

impl From<DateTime<Utc>> for LeanDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl From<LeanDate> for DateTime<Utc> {
    fn from(date: LeanDate) -> Self {
        date.instant
    }
}

/// Marker the backend returns for relation fields.
///
/// Relations can only be changed through relation operations on the owning
/// object, so the codec only ever encodes this value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeanRelation {
    pub class_name: String,
}

impl LeanRelation {
    pub const TAG: TypeTag = TypeTag::Relation;

    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

/// Any tagged LeanCloud value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeanValue {
    Pointer(LeanPointer),
    File(LeanFile),
    Bytes(LeanBytes),
    Date(LeanDate),
    Relation(LeanRelation),
}

impl LeanValue {
    /// The `__type` tag this value encodes with.
    pub fn tag(&self) -> TypeTag {
        match self {
            LeanValue::Pointer(_) => TypeTag::Pointer,
            LeanValue::File(_) => TypeTag::File,
            LeanValue::Bytes(_) => TypeTag::Bytes,
            LeanValue::Date(_) => TypeTag::Date,
            LeanValue::Relation(_) => TypeTag::Relation,
        }
    }
}

macro_rules! impl_variant_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LeanValue {
                fn from(value: $ty) -> Self {
                    LeanValue::$variant(value)
                }
            }

            impl TryFrom<LeanValue> for $ty {
                type Error = LeanTypesError;

                fn try_from(value: LeanValue) -> Result<Self, Self::Error> {
                    match value {
                        LeanValue::$variant(inner) => Ok(inner),
                        other => Err(LeanTypesError::TypeMismatch {
                            expected: <$ty>::TAG,
                            found: Some(other.tag().to_string()),
                        }),
                    }
                }
            }
        )*
    };
}

impl_variant_conversions!(
    Pointer => LeanPointer,
    File => LeanFile,
    Bytes => LeanBytes,
    Date => LeanDate,
    Relation => LeanRelation,
);
