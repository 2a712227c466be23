//! # typx
//!
//! Dynamic, nullable and optional value wrappers that marshal consistently
//! across JSON, BSON, SQLite, binary and text.
//!
//! ## Quick Start
//!
//! ```
//! use typx::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     #[serde(default)]
//!     field: Nullable<String>,
//! }
//!
//! let r: Record = serde_json::from_str(r#"{"field":null}"#).unwrap();
//! assert!(r.field.is_absent());
//!
//! let r: Record = serde_json::from_str(r#"{"field":"example"}"#).unwrap();
//! assert_eq!(r.field.get().map(String::as_str), Some("example"));
//! ```
//!
//! ## Wrappers
//!
//! - [`Dyn`] - a payload of run-time type, stored as a canonical [`Value`]
//! - [`Nullable`] - a payload that may be null; null in every format
//! - [`Optional`] - a payload that may be unset; always `{val, set}`
//!
//! ## Features
//!
//! - `sqlite` (default) - `ToSql` / `FromSql` impls through `rusqlite`

#![warn(missing_docs)]

pub mod dynamic;
mod nullable;
mod optional;
#[cfg(feature = "sqlite")]
mod sql;
mod types;

pub mod prelude;

// Re-export main entry points
pub use dynamic::Dyn;
pub use nullable::Nullable;
pub use optional::Optional;

// Re-export types
pub use types::*;
