//! Tagged-value codec for the LeanCloud JSON dialect.
//!
//! The backend carries a few special values not as JSON scalars but as
//! objects with a `__type` discriminator plus payload fields:
//!
//! | Type | Wire shape |
//! |---|---|
//! | [`LeanPointer`] | `{"__type":"Pointer","className":..,"objectId":..}` |
//! | [`LeanFile`] | `{"__type":"File","id":..}` |
//! | [`LeanBytes`] | `{"__type":"Bytes","base64":..}` |
//! | [`LeanDate`] | `{"__type":"Date","iso":"2015-07-14T02:31:50.123Z"}` |
//! | [`LeanRelation`] | `{"__type":"Relation","className":..}` (encode-only) |
//!
//! # Modules
//!
//! - [`forward`] - LeanValue → tagged JSON
//! - [`reverse`] - tagged JSON → LeanValue
//! - [`values`] - the value types and the [`LeanValue`] sum type
//! - [`kind`] - the closed set of `__type` tags
//! - [`config`] - decode switches for the lenient legacy paths
//! - [`error`] - error types for decoding
//!
//! # Example
//!
//! ```
//! use lean_types::{decode, encode, LeanPointer, LeanValue, TypeTag};
//!
//! let pointer = LeanValue::from(LeanPointer::new("Post", "55a39634e4b0ed48f0c1845c"));
//! let bytes = encode(&pointer);
//! assert_eq!(decode(&bytes, TypeTag::Pointer).unwrap(), pointer);
//! ```
//!
//! The value types also implement `serde::Serialize`/`Deserialize`, so they
//! can be used directly as fields of application structs.

pub mod config;
pub mod error;
pub mod forward;
pub mod kind;
pub mod reverse;
pub mod values;

// Re-export main types for convenient access
pub use config::CodecConfig;
pub use error::{LeanTypesError, Result};
pub use forward::{encode, to_json};
pub use kind::{TypeTag, TYPE_FIELD};
pub use reverse::{
    decode, decode_any, decode_any_value, decode_value, decode_with_config, parse_iso,
};
pub use values::{LeanBytes, LeanDate, LeanFile, LeanPointer, LeanRelation, LeanValue};
