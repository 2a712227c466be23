//! Wire encoding for typx
//!
//! This crate connects canonical [`typx_core::Value`]s to the BSON codec:
//!
//! | Direction | Function |
//! |-----------|----------|
//! | value to `(kind, bytes)` | [`encode_element`] |
//! | `(kind, bytes)` to value | [`decode_element`] |
//! | BSON to canonical | [`normalize`], [`normalize_document`] |
//! | canonical to BSON | [`to_bson`], [`to_document`] |
//!
//! ## Examples
//!
//! ```
//! use bson::Bson;
//! use typx_core::Value;
//! use typx_wire::{decode_element, encode_element, normalize};
//!
//! let (kind, bytes) = encode_element(Bson::String("example".into())).unwrap();
//! let decoded = decode_element(kind, &bytes).unwrap();
//! assert_eq!(normalize(decoded), Value::from("example"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;

pub use document::{
    decode_element, encode_element, normalize, normalize_document, to_bson, to_document,
    NULL_KIND,
};
