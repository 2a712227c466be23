//! Optional values
//!
//! [`Optional<T>`] marks a value as set or unset without using null. It is
//! always serialized as the record `{"val": .., "set": ..}`, so presence is
//! never elided from the encoded form. A missing `set` field decodes as
//! `false`.

use serde::{Deserialize, Serialize};

/// A value that may be unset, encoded structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Optional<T> {
    /// The payload; `T::default()` when unset.
    pub val: T,
    /// Whether the payload was set.
    #[serde(default)]
    pub set: bool,
}

impl<T> Optional<T> {
    /// Create a set value.
    pub const fn new(val: T) -> Self {
        Optional { val, set: true }
    }

    /// Check if the value is set.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Borrow the value if set.
    pub fn get(&self) -> Option<&T> {
        self.set.then_some(&self.val)
    }

    /// Convert into an `Option`.
    pub fn into_option(self) -> Option<T> {
        self.set.then_some(self.val)
    }
}

impl<T: Default> Optional<T> {
    /// Create an unset value.
    pub fn unset() -> Self {
        Optional {
            val: T::default(),
            set: false,
        }
    }

    /// Create from an `Option`; `None` is unset.
    pub fn from_option(val: Option<T>) -> Self {
        val.map_or_else(Self::unset, Self::new)
    }
}

impl<T: Default> From<Option<T>> for Optional<T> {
    fn from(val: Option<T>) -> Self {
        Self::from_option(val)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(val: Optional<T>) -> Self {
        val.into_option()
    }
}
