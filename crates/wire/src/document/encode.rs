//! Canonical value to BSON conversion
//!
//! Integers take the smallest BSON integer type that holds them, so values
//! that came in as `Int32` go back out as `Int32`.

use bson::spec::BinarySubtype;
use bson::{Binary, Bson, Document};
use typx_core::{Map, Result, Value};

/// Convert a canonical value into the BSON codec's native value.
pub fn to_bson(value: &Value) -> Result<Bson> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Int(i) => i32::try_from(*i).map_or(Bson::Int64(*i), Bson::Int32),
        Value::Float(f) => Bson::Double(*f),
        Value::String(s) => Bson::String(s.clone()),
        Value::Bytes(b) => Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: b.clone(),
        }),
        Value::Array(items) => Bson::Array(items.iter().map(to_bson).collect::<Result<_>>()?),
        Value::Object(map) => Bson::Document(to_document(map)?),
        // BSON-only scalars kept by `normalize` go back out unchanged
        Value::Opaque(o) => match o.downcast_ref::<Bson>() {
            Some(b) => b.clone(),
            None => o.to_bson()?,
        },
    })
}

/// Convert a canonical map into a BSON document.
pub fn to_document(map: &Map) -> Result<Document> {
    let mut doc = Document::new();
    for (k, v) in map {
        doc.insert(k.clone(), to_bson(v)?);
    }
    Ok(doc)
}
