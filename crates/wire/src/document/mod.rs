//! BSON wire encoding for canonical values
//!
//! - [`encode_element`] / [`decode_element`]: one value as `(kind, bytes)`
//! - [`normalize`]: BSON composites to canonical maps and sequences
//! - [`to_bson`]: canonical values back to BSON

mod element;
mod encode;
mod normalize;

pub use element::{decode_element, encode_element};
pub use encode::{to_bson, to_document};
pub use normalize::{normalize, normalize_document};

/// Kind tag the codec uses for null elements.
pub const NULL_KIND: bson::spec::ElementType = bson::spec::ElementType::Null;
