//! Error types shared by every typx wrapper.
//!
//! Every encode or decode call reports failure through [`Error`]. Failures are
//! local to one call: no error is fatal and callers never need to retry.
//!
//! ## Taxonomy
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | UnsupportedSourceType | a SQL source is neither NULL, BLOB nor TEXT |
//! | MissingCapability | a binary/text payload cannot marshal itself |
//! | ConversionFailure | no decode strategy matched the source value |
//! | Codec | the underlying JSON/BSON/capability codec failed |

use std::fmt;
use thiserror::Error;

/// A format capability a payload may or may not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Encoding itself to a byte sequence
    MarshalBinary,
    /// Decoding itself from a byte sequence
    UnmarshalBinary,
    /// Encoding itself to text
    MarshalText,
    /// Decoding itself from text
    UnmarshalText,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::MarshalBinary => "MarshalBinary",
            Capability::UnmarshalBinary => "UnmarshalBinary",
            Capability::MarshalText => "MarshalText",
            Capability::UnmarshalText => "UnmarshalText",
        };
        f.write_str(name)
    }
}

/// Errors surfaced unchanged from an underlying codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON encoding or decoding failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// BSON encoding failed
    #[error(transparent)]
    BsonSerialize(#[from] bson::ser::Error),

    /// BSON decoding failed
    #[error(transparent)]
    BsonDeserialize(#[from] bson::de::Error),

    /// UUID parsing failed
    #[error(transparent)]
    Uuid(#[from] uuid::Error),

    /// Element bytes could not be framed as a BSON value
    #[error("malformed BSON element: {0}")]
    MalformedElement(String),

    /// A null dynamic payload has no BSON encoding
    #[error("cannot encode a null dynamic payload as a BSON value")]
    NullDocument,

    /// Error raised by a user-supplied capability implementation
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// All typx errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A SQL source value was neither NULL, BLOB nor TEXT
    #[error("cannot scan {source_type} into Dyn: expected JSON compatible type (BLOB or TEXT)")]
    UnsupportedSourceType {
        /// SQLite storage class of the rejected value
        source_type: String,
    },

    /// The payload does not implement the requested capability
    #[error("type {type_name} does not implement {capability}")]
    MissingCapability {
        /// Name of the payload type
        type_name: String,
        /// Capability that was required
        capability: Capability,
    },

    /// No decode strategy matched the source value
    #[error("cannot convert {source_value} into {target}")]
    ConversionFailure {
        /// Debug rendering of the source value
        source_value: String,
        /// Name of the target type
        target: &'static str,
    },

    /// The underlying codec failed
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for typx operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::MissingCapability`] for `type_name`.
    pub fn missing_capability(type_name: impl Into<String>, capability: Capability) -> Self {
        Error::MissingCapability {
            type_name: type_name.into(),
            capability,
        }
    }

    /// Build a [`Error::ConversionFailure`] for a source rendered with `Debug`.
    pub fn conversion<S: fmt::Debug + ?Sized>(source: &S, target: &'static str) -> Self {
        Error::ConversionFailure {
            source_value: format!("{:?}", source),
            target,
        }
    }

    /// Wrap an error raised by a custom capability implementation.
    pub fn custom<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Codec(CodecError::Custom(Box::new(error)))
    }

    /// Check if the source type was rejected outright.
    pub fn is_unsupported_source(&self) -> bool {
        matches!(self, Error::UnsupportedSourceType { .. })
    }

    /// Check if a capability was missing.
    pub fn is_missing_capability(&self) -> bool {
        matches!(self, Error::MissingCapability { .. })
    }

    /// Check if no conversion strategy applied.
    pub fn is_conversion_failure(&self) -> bool {
        matches!(self, Error::ConversionFailure { .. })
    }

    /// Check if the error came from an underlying codec.
    pub fn is_codec(&self) -> bool {
        matches!(self, Error::Codec(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Codec(CodecError::Json(e))
    }
}

impl From<bson::ser::Error> for Error {
    fn from(e: bson::ser::Error) -> Self {
        Error::Codec(CodecError::BsonSerialize(e))
    }
}

impl From<bson::de::Error> for Error {
    fn from(e: bson::de::Error) -> Self {
        Error::Codec(CodecError::BsonDeserialize(e))
    }
}

impl From<uuid::Error> for Error {
    fn from(e: uuid::Error) -> Self {
        Error::Codec(CodecError::Uuid(e))
    }
}
