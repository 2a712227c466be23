//! Binary and text capability traits
//!
//! A payload that knows how to turn itself into bytes or text implements these
//! traits. Wrappers require them as bounds, so a missing capability on a
//! statically typed payload is a compile error rather than a run-time one.
//!
//! Byte sequences and strings get blanket implementations: both are written
//! verbatim, and strings are UTF-8 checked when decoded.

use crate::error::{Error, Result};
use uuid::Uuid;

/// Encode a value as a byte sequence.
pub trait MarshalBinary {
    /// Marshal `self` into bytes.
    fn marshal_binary(&self) -> Result<Vec<u8>>;
}

/// Decode a value from a byte sequence in place.
pub trait UnmarshalBinary {
    /// Replace `self` with the value encoded in `data`.
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()>;
}

/// Encode a value as text.
pub trait MarshalText {
    /// Marshal `self` into UTF-8 text bytes.
    fn marshal_text(&self) -> Result<Vec<u8>>;
}

/// Decode a value from text in place.
pub trait UnmarshalText {
    /// Replace `self` with the value encoded in `data`.
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()>;
}

fn utf8(data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec())
        .map_err(|_| Error::conversion(data, std::any::type_name::<String>()))
}

impl MarshalBinary for String {
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl UnmarshalBinary for String {
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        *self = utf8(data)?;
        Ok(())
    }
}

impl MarshalText for String {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl UnmarshalText for String {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        *self = utf8(data)?;
        Ok(())
    }
}

impl MarshalBinary for Vec<u8> {
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl UnmarshalBinary for Vec<u8> {
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        *self = data.to_vec();
        Ok(())
    }
}

impl MarshalText for Vec<u8> {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl UnmarshalText for Vec<u8> {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        *self = data.to_vec();
        Ok(())
    }
}

// UUIDs marshal as their 16 raw bytes or their hyphenated form.

impl MarshalBinary for Uuid {
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl UnmarshalBinary for Uuid {
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        *self = Uuid::from_slice(data)?;
        Ok(())
    }
}

impl MarshalText for Uuid {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(self.hyphenated().to_string().into_bytes())
    }
}

impl UnmarshalText for Uuid {
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(data)
            .map_err(|_| Error::conversion(data, std::any::type_name::<Uuid>()))?;
        *self = Uuid::parse_str(text)?;
        Ok(())
    }
}
