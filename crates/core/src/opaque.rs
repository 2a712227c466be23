//! Erased payloads with captured capabilities
//!
//! An [`Opaque`] owns a value whose concrete type is forgotten. Because Rust
//! cannot ask an erased value whether it implements a trait, the binary and
//! text capabilities are captured as function pointers while the type is still
//! known, through [`OpaqueBuilder::binary`] and [`OpaqueBuilder::text`].
//!
//! ```
//! use typx_core::Opaque;
//! use uuid::Uuid;
//!
//! let id = Uuid::new_v4();
//! let opaque = Opaque::builder(id).binary().text().build();
//! assert_eq!(opaque.marshal_binary().unwrap(), id.as_bytes().to_vec());
//! assert_eq!(opaque.downcast_ref::<Uuid>(), Some(&id));
//! ```

use crate::capability::{MarshalBinary, MarshalText, UnmarshalBinary, UnmarshalText};
use crate::error::{Capability, Error, Result};
use bson::Bson;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt;

/// Bounds every erased payload must satisfy.
pub trait Payload: Serialize + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Payload for T where T: Serialize + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

type MarshalFn<T> = fn(&T) -> Result<Vec<u8>>;
type UnmarshalFn<T> = fn(&mut T, &[u8]) -> Result<()>;

struct Capabilities<T> {
    marshal_binary: Option<MarshalFn<T>>,
    unmarshal_binary: Option<UnmarshalFn<T>>,
    marshal_text: Option<MarshalFn<T>>,
    unmarshal_text: Option<UnmarshalFn<T>>,
}

impl<T> Clone for Capabilities<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Capabilities<T> {}

impl<T> Capabilities<T> {
    fn none() -> Self {
        Capabilities {
            marshal_binary: None,
            unmarshal_binary: None,
            marshal_text: None,
            unmarshal_text: None,
        }
    }
}

trait ErasedPayload: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_box(&self) -> Box<dyn ErasedPayload>;
    fn eq_dyn(&self, other: &dyn ErasedPayload) -> bool;
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn to_json(&self) -> Result<serde_json::Value>;
    fn to_bson(&self) -> Result<Bson>;
    fn marshal(&self, capability: Capability) -> Option<Result<Vec<u8>>>;
    fn unmarshal(&mut self, capability: Capability, data: &[u8]) -> Option<Result<()>>;
}

struct Erased<T> {
    value: T,
    caps: Capabilities<T>,
}

impl<T: Payload> ErasedPayload for Erased<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        &self.value
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn clone_box(&self) -> Box<dyn ErasedPayload> {
        Box::new(Erased {
            value: self.value.clone(),
            caps: self.caps,
        })
    }

    fn eq_dyn(&self, other: &dyn ErasedPayload) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| &self.value == other)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.value)?)
    }

    fn to_bson(&self) -> Result<Bson> {
        Ok(bson::to_bson(&self.value)?)
    }

    fn marshal(&self, capability: Capability) -> Option<Result<Vec<u8>>> {
        let f = match capability {
            Capability::MarshalBinary => self.caps.marshal_binary,
            Capability::MarshalText => self.caps.marshal_text,
            _ => None,
        }?;
        Some(f(&self.value))
    }

    fn unmarshal(&mut self, capability: Capability, data: &[u8]) -> Option<Result<()>> {
        let f = match capability {
            Capability::UnmarshalBinary => self.caps.unmarshal_binary,
            Capability::UnmarshalText => self.caps.unmarshal_text,
            _ => None,
        }?;
        Some(f(&mut self.value, data))
    }
}

/// An owned payload of erased type.
pub struct Opaque {
    inner: Box<dyn ErasedPayload>,
}

/// Builder that records which capabilities an [`Opaque`] exposes.
pub struct OpaqueBuilder<T> {
    value: T,
    caps: Capabilities<T>,
}

impl<T: Payload> OpaqueBuilder<T> {
    /// Expose `T`'s binary capability.
    pub fn binary(mut self) -> Self
    where
        T: MarshalBinary + UnmarshalBinary,
    {
        self.caps.marshal_binary = Some(T::marshal_binary);
        self.caps.unmarshal_binary = Some(T::unmarshal_binary);
        self
    }

    /// Expose `T`'s text capability.
    pub fn text(mut self) -> Self
    where
        T: MarshalText + UnmarshalText,
    {
        self.caps.marshal_text = Some(T::marshal_text);
        self.caps.unmarshal_text = Some(T::unmarshal_text);
        self
    }

    /// Finish building.
    pub fn build(self) -> Opaque {
        Opaque {
            inner: Box::new(Erased {
                value: self.value,
                caps: self.caps,
            }),
        }
    }
}

impl Opaque {
    /// Erase `value` without exposing any capability.
    pub fn new<T: Payload>(value: T) -> Self {
        Self::builder(value).build()
    }

    /// Start building an opaque payload around `value`.
    pub fn builder<T: Payload>(value: T) -> OpaqueBuilder<T> {
        OpaqueBuilder {
            value,
            caps: Capabilities::none(),
        }
    }

    /// Fully qualified name of the erased type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Check if the erased type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_any().is::<T>()
    }

    /// Borrow the payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the payload as `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.as_any_mut().downcast_mut::<T>()
    }

    /// Render the payload as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.inner.to_json()
    }

    /// Render the payload as a BSON value.
    pub fn to_bson(&self) -> Result<Bson> {
        self.inner.to_bson()
    }

    /// Marshal through the captured binary capability.
    pub fn marshal_binary(&self) -> Result<Vec<u8>> {
        self.marshal(Capability::MarshalBinary)
    }

    /// Unmarshal in place through the captured binary capability.
    pub fn unmarshal_binary(&mut self, data: &[u8]) -> Result<()> {
        self.unmarshal(Capability::UnmarshalBinary, data)
    }

    /// Marshal through the captured text capability.
    pub fn marshal_text(&self) -> Result<Vec<u8>> {
        self.marshal(Capability::MarshalText)
    }

    /// Unmarshal in place through the captured text capability.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        self.unmarshal(Capability::UnmarshalText, data)
    }

    fn marshal(&self, capability: Capability) -> Result<Vec<u8>> {
        self.inner
            .marshal(capability)
            .unwrap_or_else(|| Err(Error::missing_capability(self.type_name(), capability)))
    }

    fn unmarshal(&mut self, capability: Capability, data: &[u8]) -> Result<()> {
        let type_name = self.type_name();
        self.inner
            .unmarshal(capability, data)
            .unwrap_or_else(|| Err(Error::missing_capability(type_name, capability)))
    }
}

impl Clone for Opaque {
    fn clone(&self) -> Self {
        Opaque {
            inner: self.inner.clone_box(),
        }
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_dyn(other.inner.as_ref())
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>(", self.type_name())?;
        self.inner.fmt_debug(f)?;
        f.write_str(")")
    }
}

/// Serializes the payload's JSON projection, whatever the target format.
///
/// The erased value cannot reach a generic serializer directly, so a
/// payload whose serde form depends on the format loses that. A `Vec<u8>`
/// comes out as a sequence of numbers under bincode or BSON serde too. The
/// BSON paths of the wrappers call [`Opaque::to_bson`] instead and keep the
/// payload's own BSON form.
impl Serialize for Opaque {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::Error as _;
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
