//! BSON to canonical value normalization
//!
//! The BSON codec hands back its own composites (`Document`, arrays of
//! `Bson`). [`normalize`] rewrites them depth-first into [`Value::Object`] and
//! [`Value::Array`] so that none remain reachable from a dynamic payload.
//! Scalars pass through: the ones with a canonical variant are mapped onto
//! it, the BSON-only ones (object ids, timestamps, decimals, ...) are kept
//! unchanged inside an [`Opaque`].

use bson::spec::BinarySubtype;
use bson::{Bson, Document};
use tracing::trace;
use typx_core::{Map, Opaque, Value};

/// Rewrite a BSON value into the canonical container.
pub fn normalize(value: Bson) -> Value {
    match value {
        Bson::Null => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Int(i64::from(i)),
        Bson::Int64(i) => Value::Int(i),
        Bson::Double(f) => Value::Float(f),
        Bson::String(s) => Value::String(s),
        Bson::Binary(bin) if bin.subtype == BinarySubtype::Generic => Value::Bytes(bin.bytes),
        Bson::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Bson::Document(doc) => Value::Object(normalize_document(doc)),
        other => {
            trace!("keeping {:?} element as opaque scalar", other.element_type());
            Value::Opaque(Opaque::new(other))
        }
    }
}

/// Rewrite every entry of a document into a canonical map.
pub fn normalize_document(doc: Document) -> Map {
    doc.into_iter().map(|(k, v)| (k, normalize(v))).collect()
}
