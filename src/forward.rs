//! Forward conversion: LeanValue → tagged JSON.
//!
//! Every value encodes to a flat JSON object whose first field is `__type`.
//! Encoding has no error path.

use crate::kind::{TypeTag, TYPE_FIELD};
use crate::values::{
    LeanBytes, LeanDate, LeanFile, LeanPointer, LeanRelation, LeanValue, DATE_FORMAT,
};
use base64::Engine;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::json;

/// Encode a value to its canonical tagged JSON bytes.
///
/// ```
/// use lean_types::{encode, LeanFile, LeanValue};
///
/// let bytes = encode(&LeanValue::File(LeanFile::new("543cbaede4b07db196f50f3c")));
/// assert_eq!(
///     bytes,
///     br#"{"__type":"File","id":"543cbaede4b07db196f50f3c"}"#.to_vec()
/// );
/// ```
pub fn encode(value: &LeanValue) -> Vec<u8> {
    to_json(value).to_string().into_bytes()
}

/// Encode a value to a `serde_json::Value` object, tag first.
pub fn to_json(value: &LeanValue) -> serde_json::Value {
    match value {
        LeanValue::Pointer(p) => p.to_json(),
        LeanValue::File(f) => f.to_json(),
        LeanValue::Bytes(b) => b.to_json(),
        LeanValue::Date(d) => d.to_json(),
        LeanValue::Relation(r) => r.to_json(),
    }
}

fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Format an instant as the wire `iso` string. Sub-millisecond digits are dropped.
pub(crate) fn format_iso(date: &LeanDate) -> String {
    date.instant().format(DATE_FORMAT).to_string()
}

impl LeanPointer {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            TYPE_FIELD: TypeTag::Pointer.as_str(),
            "className": self.class_name,
            "objectId": self.object_id,
        })
    }
}

impl LeanFile {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            TYPE_FIELD: TypeTag::File.as_str(),
            "id": self.id,
        })
    }
}

impl LeanBytes {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            TYPE_FIELD: TypeTag::Bytes.as_str(),
            "base64": encode_base64(self.as_bytes()),
        })
    }
}

impl LeanDate {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            TYPE_FIELD: TypeTag::Date.as_str(),
            "iso": format_iso(self),
        })
    }
}

impl LeanRelation {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            TYPE_FIELD: TypeTag::Relation.as_str(),
            "className": self.class_name,
        })
    }
}

impl LeanValue {
    /// Same as [`encode`].
    pub fn to_json_bytes(&self) -> Vec<u8> {
        encode(self)
    }
}

// Serialize impls write the same objects as `to_json`, entry by entry, so the
// values can sit inside caller-defined `#[derive(Serialize)]` structs.

impl Serialize for LeanPointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(TYPE_FIELD, TypeTag::Pointer.as_str())?;
        map.serialize_entry("className", &self.class_name)?;
        map.serialize_entry("objectId", &self.object_id)?;
        map.end()
    }
}

impl Serialize for LeanFile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(TYPE_FIELD, TypeTag::File.as_str())?;
        map.serialize_entry("id", &self.id)?;
        map.end()
    }
}

impl Serialize for LeanBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(TYPE_FIELD, TypeTag::Bytes.as_str())?;
        map.serialize_entry("base64", &encode_base64(self.as_bytes()))?;
        map.end()
    }
}

impl Serialize for LeanDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(TYPE_FIELD, TypeTag::Date.as_str())?;
        map.serialize_entry("iso", &format_iso(self))?;
        map.end()
    }
}

impl Serialize for LeanRelation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(TYPE_FIELD, TypeTag::Relation.as_str())?;
        map.serialize_entry("className", &self.class_name)?;
        map.end()
    }
}

impl Serialize for LeanValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LeanValue::Pointer(p) => p.serialize(serializer),
            LeanValue::File(f) => f.serialize(serializer),
            LeanValue::Bytes(b) => b.serialize(serializer),
            LeanValue::Date(d) => d.serialize(serializer),
            LeanValue::Relation(r) => r.serialize(serializer),
        }
    }
}
