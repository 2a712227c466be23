//! Convenient imports for typx.
//!
//! ```
//! use typx::prelude::*;
//!
//! let n = Nullable::new("example".to_string());
//! assert_eq!(n.marshal_text().unwrap(), b"example".to_vec());
//! ```

// Wrappers
pub use crate::dynamic::Dyn;
pub use crate::nullable::Nullable;
pub use crate::optional::Optional;

// Error handling
pub use crate::types::{Error, Result};

// Payloads and capabilities
pub use crate::types::{
    MarshalBinary, MarshalText, Opaque, UnmarshalBinary, UnmarshalText, Value,
};
