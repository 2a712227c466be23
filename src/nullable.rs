//! Nullable values
//!
//! [`Nullable<T>`] is either Absent or Present(T). Absence is written as the
//! null form of every format:
//!
//! | Format | Absent encodes to |
//! |--------|-------------------|
//! | JSON | `null` |
//! | BSON | `Null` / `(ElementType::Null, [])` |
//! | SQL | `NULL` |
//! | binary | zero-length bytes |
//! | text | `null` |
//!
//! Every decode starts by resetting to Absent. A null source leaves it there
//! without error. Otherwise `T`'s own capability for the format decides; if it
//! fails the wrapper stays Absent and the error is returned unchanged.

use crate::types::{ElementType, MarshalBinary, MarshalText, Result, UnmarshalBinary, UnmarshalText};
use bson::Bson;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Text form of an absent value.
const NULL_TEXT: &[u8] = b"null";

/// A value that may be null.
///
/// When absent, the payload holds `T::default()` and is never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    value: T,
    present: bool,
}

impl<T> Nullable<T> {
    /// Create a present value.
    pub const fn new(value: T) -> Self {
        Nullable {
            value,
            present: true,
        }
    }

    /// Check if a value is present.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Check if the value is absent.
    pub fn is_absent(&self) -> bool {
        !self.present
    }

    /// Borrow the value if present.
    pub fn get(&self) -> Option<&T> {
        self.present.then_some(&self.value)
    }

    /// Mutably borrow the value if present.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.present {
            Some(&mut self.value)
        } else {
            None
        }
    }

    /// Raw payload, `T::default()` when absent.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Convert into an `Option`.
    pub fn into_option(self) -> Option<T> {
        self.present.then_some(self.value)
    }
}

impl<T: Default> Nullable<T> {
    /// Create an absent value.
    pub fn absent() -> Self {
        Nullable {
            value: T::default(),
            present: false,
        }
    }

    /// Create from an `Option`; `None` is absent.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or_else(Self::absent, Self::new)
    }

    fn reset(&mut self) {
        self.value = T::default();
        self.present = false;
    }

    /// Reset, then fill from `data` through `decode`.
    ///
    /// Decodes into a fresh `T::default()` so a failure leaves the wrapper
    /// Absent rather than holding a half-written payload.
    fn decode_with(&mut self, data: &[u8], decode: fn(&mut T, &[u8]) -> Result<()>) -> Result<()> {
        self.reset();
        let mut value = T::default();
        match decode(&mut value, data) {
            Ok(()) => {
                *self = Self::new(value);
                Ok(())
            }
            Err(e) => {
                debug!(
                    "decode into Nullable<{}> failed, left absent: {}",
                    std::any::type_name::<T>(),
                    e
                );
                Err(e)
            }
        }
    }
}

impl<T: Default> Default for Nullable<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

// ============================================================================
// JSON / BSON
// ============================================================================

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.get() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}

impl<T: Serialize> Nullable<T> {
    /// Encode as JSON; absent is `null`.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encode as a BSON value; absent is `Bson::Null`.
    pub fn to_bson(&self) -> Result<Bson> {
        Ok(bson::to_bson(self)?)
    }

    /// Encode as a BSON element kind and raw bytes.
    pub fn to_bson_value(&self) -> Result<(ElementType, Vec<u8>)> {
        typx_wire::encode_element(self.to_bson()?)
    }
}

impl<T: DeserializeOwned + Default> Nullable<T> {
    /// Decode from JSON; `null` is absent.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Decode from a BSON value; `Bson::Null` is absent.
    pub fn from_bson(value: Bson) -> Result<Self> {
        if let Bson::Null = value {
            return Ok(Self::absent());
        }
        Ok(Self::new(bson::from_bson(value)?))
    }

    /// Decode from a BSON element kind and raw bytes.
    pub fn from_bson_value(kind: ElementType, data: &[u8]) -> Result<Self> {
        if kind == typx_wire::NULL_KIND {
            return Ok(Self::absent());
        }
        Self::from_bson(typx_wire::decode_element(kind, data)?)
    }
}

// ============================================================================
// Binary / text
// ============================================================================

impl<T: MarshalBinary> MarshalBinary for Nullable<T> {
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        match self.get() {
            Some(value) => value.marshal_binary(),
            None => Ok(Vec::new()),
        }
    }
}

impl<T: UnmarshalBinary + Default> UnmarshalBinary for Nullable<T> {
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            self.reset();
            return Ok(());
        }
        self.decode_with(data, T::unmarshal_binary)
    }
}

impl<T: MarshalText> MarshalText for Nullable<T> {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        match self.get() {
            Some(value) => value.marshal_text(),
            None => Ok(NULL_TEXT.to_vec()),
        }
    }
}

impl<T: UnmarshalText + Default> UnmarshalText for Nullable<T> {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() || data == NULL_TEXT {
            self.reset();
            return Ok(());
        }
        self.decode_with(data, T::unmarshal_text)
    }
}
