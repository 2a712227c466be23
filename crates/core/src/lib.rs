//! Core types for typx
//!
//! This crate holds the pieces every wrapper shares:
//!
//! - [`Value`]: the canonical container dynamic payloads are stored in
//! - [`Opaque`]: an erased payload that remembers its binary/text capabilities
//! - [`MarshalBinary`], [`UnmarshalBinary`], [`MarshalText`], [`UnmarshalText`]:
//!   the capability traits payloads implement
//! - [`Error`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod error;
pub mod opaque;
pub mod value;

pub use capability::{MarshalBinary, MarshalText, UnmarshalBinary, UnmarshalText};
pub use error::{Capability, CodecError, Error, Result};
pub use opaque::{Opaque, OpaqueBuilder, Payload};
pub use value::{Map, Value};
