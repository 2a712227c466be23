//! Dynamic values
//!
//! [`Dyn`] holds a payload whose type is only known at run time. The payload
//! is a canonical [`Value`]; anything that does not fit a canonical variant is
//! carried as an [`Opaque`], which may itself be another `Dyn`.
//!
//! | Format | Encode | Decode |
//! |--------|--------|--------|
//! | JSON | serde_json on the payload | into canonical containers |
//! | BSON | codec value, null payload rejected | normalized canonical containers |
//! | SQL | JSON bytes as BLOB | NULL, BLOB or TEXT holding JSON |
//! | binary / text | opaque payload capability only | opaque payload capability only |
//!
//! Binary and text are a strict capability check: a plain `String` payload
//! is not coerced to bytes here.
//!
//! A `Dyn` field missing from a record decodes as a null payload. Record
//! fields bound for a document store should use
//! [`dynamic::bson`](self::bson) so they are normalized the same way as
//! [`Dyn::from_bson`].

use crate::types::{
    Capability, CodecError, ElementType, Error, MarshalBinary, MarshalText, Opaque, Payload,
    Result, UnmarshalBinary, UnmarshalText, Value,
};
use ::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// A value of run-time type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dyn {
    /// The payload; replaced wholesale by every decode.
    pub value: Value,
}

impl Dyn {
    /// Wrap anything convertible into a canonical value.
    pub fn new(value: impl Into<Value>) -> Self {
        Dyn {
            value: value.into(),
        }
    }

    /// A null payload.
    pub fn null() -> Self {
        Dyn { value: Value::Null }
    }

    /// Wrap an arbitrary payload without exposing any capability.
    ///
    /// Use [`Opaque::builder`] to expose binary or text capabilities.
    pub fn opaque<T: Payload>(value: T) -> Self {
        Dyn::new(Opaque::new(value))
    }

    /// Check if the payload is null.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Unwrap the payload.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Encode the payload as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.value)?)
    }

    /// Decode a JSON document into canonical containers.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(Dyn {
            value: serde_json::from_slice(data)?,
        })
    }

    /// Convert the payload into a BSON value.
    ///
    /// A null payload has no BSON encoding and is rejected, even though the
    /// SQL encoding of the same payload succeeds with `null`.
    pub fn to_bson(&self) -> Result<Bson> {
        if self.value.is_null() {
            return Err(CodecError::NullDocument.into());
        }
        typx_wire::to_bson(&self.value)
    }

    /// Encode the payload as a BSON element kind and raw bytes.
    pub fn to_bson_value(&self) -> Result<(ElementType, Vec<u8>)> {
        typx_wire::encode_element(self.to_bson()?)
    }

    /// Take a BSON value, normalizing its composites.
    pub fn from_bson(value: Bson) -> Self {
        Dyn {
            value: typx_wire::normalize(value),
        }
    }

    /// Decode a BSON element kind and raw bytes, normalizing composites.
    pub fn from_bson_value(kind: ElementType, data: &[u8]) -> Result<Self> {
        Ok(Self::from_bson(typx_wire::decode_element(kind, data)?))
    }

    fn marshal(&self, capability: Capability) -> Result<Vec<u8>> {
        match &self.value {
            Value::Opaque(o) if capability == Capability::MarshalBinary => o.marshal_binary(),
            Value::Opaque(o) => o.marshal_text(),
            other => Err(Error::missing_capability(other.type_name(), capability)),
        }
    }

    fn unmarshal(&mut self, capability: Capability, data: &[u8]) -> Result<()> {
        let result = match &mut self.value {
            Value::Opaque(o) if capability == Capability::UnmarshalBinary => {
                o.unmarshal_binary(data)
            }
            Value::Opaque(o) => o.unmarshal_text(data),
            other => Err(Error::missing_capability(other.type_name(), capability)),
        };
        if let Err(e) = &result {
            debug!("{} on Dyn failed, payload reset to null: {}", capability, e);
            self.value = Value::Null;
        }
        result
    }
}

impl From<Value> for Dyn {
    fn from(value: Value) -> Self {
        Dyn { value }
    }
}

impl From<Dyn> for Value {
    fn from(d: Dyn) -> Self {
        d.value
    }
}

impl Serialize for Dyn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dyn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Through `Option` so null and missing fields both give a null payload
        Option::<Value>::deserialize(deserializer).map(|v| Dyn::new(v.unwrap_or_default()))
    }
}

/// Serde adapter for `Dyn` record fields stored in BSON.
///
/// The plain `Serialize` impl widens every integer to `Int64` and decodes
/// BSON-only scalars as their extended JSON maps. This adapter goes through
/// [`typx_wire::to_bson`] and [`typx_wire::normalize`] instead:
///
/// ```
/// use bson::{doc, oid::ObjectId, Bson};
/// use serde::{Deserialize, Serialize};
/// use typx::Dyn;
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "typx::dynamic::bson", default)]
///     payload: Dyn,
/// }
///
/// let id = ObjectId::new();
/// let row: Row = bson::from_document(doc! { "payload": { "id": id } }).unwrap();
/// let inner = row.payload.value.as_object().unwrap();
/// assert_eq!(inner["id"].downcast_ref::<Bson>(), Some(&Bson::ObjectId(id)));
/// ```
///
/// Add `default` as above to accept records where the field is missing.
pub mod bson {
    use super::Dyn;
    use ::bson::Bson;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize the payload as its BSON value; a null payload is `Null`.
    pub fn serialize<S: Serializer>(value: &Dyn, serializer: S) -> Result<S::Ok, S::Error> {
        typx_wire::to_bson(&value.value)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }

    /// Deserialize a BSON value and normalize it.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Dyn, D::Error> {
        Bson::deserialize(deserializer).map(Dyn::from_bson)
    }
}

impl MarshalBinary for Dyn {
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        self.marshal(Capability::MarshalBinary)
    }
}

impl UnmarshalBinary for Dyn {
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        self.unmarshal(Capability::UnmarshalBinary, data)
    }
}

impl MarshalText for Dyn {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        self.marshal(Capability::MarshalText)
    }
}

impl UnmarshalText for Dyn {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        self.unmarshal(Capability::UnmarshalText, data)
    }
}
