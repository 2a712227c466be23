//! Public types for typx.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Core value types
pub use typx_core::{Map, Value};

// Erased payloads
pub use typx_core::{Opaque, OpaqueBuilder, Payload};

// Capability traits
pub use typx_core::{MarshalBinary, MarshalText, UnmarshalBinary, UnmarshalText};

// Errors
pub use typx_core::{Capability, CodecError, Error, Result};

// BSON element kind, `ElementType::Null` is the null sentinel
pub use bson::spec::ElementType;
