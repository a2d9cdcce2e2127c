//! Reverse conversion: tagged JSON → LeanValue.
//!
//! Decoding parses the input into a flat map of string fields, checks the
//! `__type` tag against the caller's expectation and fills the matching
//! variant from the remaining fields.

use crate::config::CodecConfig;
use crate::error::{LeanTypesError, Result};
use crate::kind::{TypeTag, TYPE_FIELD};
use crate::values::{LeanBytes, LeanDate, LeanFile, LeanPointer, LeanValue, DATE_FORMAT};
use base64::Engine;
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::de::{Deserialize, Deserializer, Error as _};
use std::collections::HashMap;
use tracing::{debug, trace};

/// String fields of a tagged object, keyed by field name.
type Fields = HashMap<String, String>;

/// Decode `input` as a tagged value of the `expected` kind, using the default
/// [`CodecConfig`].
///
/// ```
/// use lean_types::{decode, LeanValue, TypeTag};
///
/// let value = decode(br#"{"__type":"Bytes","base64":"aGVsbG8="}"#, TypeTag::Bytes).unwrap();
/// match value {
///     LeanValue::Bytes(b) => assert_eq!(b.as_bytes(), b"hello"),
///     other => panic!("unexpected value: {other:?}"),
/// }
/// ```
pub fn decode(input: &[u8], expected: TypeTag) -> Result<LeanValue> {
    decode_with_config(input, expected, &CodecConfig::default())
}

/// Decode `input` as a tagged value of the `expected` kind.
pub fn decode_with_config(
    input: &[u8],
    expected: TypeTag,
    config: &CodecConfig,
) -> Result<LeanValue> {
    let value: serde_json::Value =
        serde_json::from_slice(input).map_err(LeanTypesError::malformed)?;
    decode_value(&value, expected, config)
}

/// Decode an already-parsed JSON value as a tagged value of the `expected` kind.
///
/// This is the entry point for callers that hold a larger document and decode
/// one field of it at a time.
pub fn decode_value(
    value: &serde_json::Value,
    expected: TypeTag,
    config: &CodecConfig,
) -> Result<LeanValue> {
    if expected == TypeTag::Date && config.accept_bare_date_strings {
        if let serde_json::Value::String(s) = value {
            match parse_iso(s) {
                Ok(date) => return Ok(LeanValue::Date(date)),
                Err(e) => {
                    debug!("Bare date string {s:?} did not parse ({e}), trying tagged object");
                }
            }
        }
    }

    let fields = to_fields(value)?;
    check_tag(&fields, expected)?;
    fill(expected, &fields, config)
}

/// Decode `input` by dispatching on its own `__type` tag.
pub fn decode_any(input: &[u8]) -> Result<LeanValue> {
    let value: serde_json::Value =
        serde_json::from_slice(input).map_err(LeanTypesError::malformed)?;
    decode_any_value(&value, &CodecConfig::default())
}

/// Decode an already-parsed JSON value by dispatching on its own `__type` tag.
///
/// Bare strings are not accepted here: without a tag there is nothing to
/// dispatch on.
pub fn decode_any_value(value: &serde_json::Value, config: &CodecConfig) -> Result<LeanValue> {
    let fields = to_fields(value)?;
    let found = fields.get(TYPE_FIELD);
    let tag = found
        .and_then(|t| t.parse::<TypeTag>().ok())
        .ok_or_else(|| LeanTypesError::UnknownTag(found.cloned()))?;
    debug!("Dispatching tagged value with __type '{tag}'");
    fill(tag, &fields, config)
}

/// Parse a wire `iso` string (`YYYY-MM-DDTHH:MM:SS.sssZ`).
///
/// Only the canonical form is accepted: exactly three fractional digits, a
/// literal `Z` suffix and no offset.
pub fn parse_iso(s: &str) -> Result<LeanDate> {
    let naive = NaiveDateTime::parse_from_str(s, DATE_FORMAT).map_err(LeanTypesError::malformed)?;
    let date = LeanDate::new(Utc.from_utc_datetime(&naive));
    // chrono treats the fraction as optional and accepts a short one, so
    // anything that does not format back to the input is rejected.
    if crate::forward::format_iso(&date) != s {
        return Err(LeanTypesError::MalformedInput(format!(
            "date '{s}' is not in the form YYYY-MM-DDTHH:MM:SS.sssZ"
        )));
    }
    Ok(date)
}

fn to_fields(value: &serde_json::Value) -> Result<Fields> {
    Fields::deserialize(value).map_err(LeanTypesError::malformed)
}

fn check_tag(fields: &Fields, expected: TypeTag) -> Result<()> {
    match fields.get(TYPE_FIELD) {
        Some(found) if found == expected.as_str() => Ok(()),
        found => Err(LeanTypesError::TypeMismatch {
            expected,
            found: found.cloned(),
        }),
    }
}

fn fill(tag: TypeTag, fields: &Fields, config: &CodecConfig) -> Result<LeanValue> {
    let value = match tag {
        TypeTag::Pointer => LeanValue::Pointer(fill_pointer(fields, config)?),
        TypeTag::File => LeanValue::File(fill_file(fields)?),
        TypeTag::Bytes => LeanValue::Bytes(fill_bytes(fields)?),
        TypeTag::Date => LeanValue::Date(fill_date(fields)?),
        TypeTag::Relation => return Err(LeanTypesError::EncodeOnly(tag)),
    };
    trace!("Filled {tag} value: {value:?}");
    Ok(value)
}

fn required<'a>(fields: &'a Fields, tag: TypeTag, field: &'static str) -> Result<&'a String> {
    fields
        .get(field)
        .ok_or(LeanTypesError::MissingField { tag, field })
}

fn fill_pointer(fields: &Fields, config: &CodecConfig) -> Result<LeanPointer> {
    if config.strict_pointer_fields {
        let class_name = required(fields, TypeTag::Pointer, "className")?;
        let object_id = required(fields, TypeTag::Pointer, "objectId")?;
        return Ok(LeanPointer::new(class_name.as_str(), object_id.as_str()));
    }
    // Absent fields become empty strings.
    Ok(LeanPointer {
        class_name: fields.get("className").cloned().unwrap_or_default(),
        object_id: fields.get("objectId").cloned().unwrap_or_default(),
    })
}

fn fill_file(fields: &Fields) -> Result<LeanFile> {
    let id = required(fields, TypeTag::File, "id")?;
    Ok(LeanFile::new(id.as_str()))
}

fn fill_bytes(fields: &Fields) -> Result<LeanBytes> {
    // A missing payload reads as "" and decodes to an empty blob.
    let encoded = fields.get("base64").map(String::as_str).unwrap_or_default();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(LeanTypesError::malformed)?;
    Ok(LeanBytes::new(bytes))
}

fn fill_date(fields: &Fields) -> Result<LeanDate> {
    let iso = required(fields, TypeTag::Date, "iso")?;
    parse_iso(iso)
}

fn decode_field<'de, D, T>(deserializer: D, tag: TypeTag) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<LeanValue, Error = LeanTypesError>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    decode_value(&raw, tag, &CodecConfig::default())
        .and_then(T::try_from)
        .map_err(D::Error::custom)
}

macro_rules! impl_typed_decode {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Decode tagged JSON bytes into this type with the default config.
                pub fn from_json(input: &[u8]) -> Result<Self> {
                    decode(input, <$ty>::TAG).and_then(<$ty>::try_from)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    decode_field(deserializer, <$ty>::TAG)
                }
            }
        )*
    };
}

impl_typed_decode!(LeanPointer, LeanFile, LeanBytes, LeanDate);
