//! SQLite bridge
//!
//! `ToSql` / `FromSql` for [`Dyn`] and [`Nullable`].
//!
//! - `Dyn` is stored as its JSON bytes in a BLOB and read back from a BLOB or
//!   TEXT column. Any other storage class is rejected.
//! - `Nullable<T>` maps absence to `NULL` and otherwise defers to `T`. When
//!   `T` rejects the storage class, a BLOB may still fill a `String` and a
//!   TEXT may still fill a `Vec<u8>`.

use crate::dynamic::Dyn;
use crate::nullable::Nullable;
use crate::types::{CodecError, Error, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::any::{type_name, Any};
use tracing::trace;

fn to_sql_error(e: Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

fn from_sql_error(e: Error) -> FromSqlError {
    FromSqlError::Other(Box::new(e))
}

// ============================================================================
// Dyn
// ============================================================================

impl Dyn {
    /// Decode a SQL column holding JSON.
    ///
    /// `NULL` gives a null payload. BLOB and TEXT are parsed as JSON. Integers
    /// and reals are rejected with [`Error::UnsupportedSourceType`].
    pub fn from_sql(value: ValueRef<'_>) -> Result<Self> {
        match value {
            ValueRef::Null => Ok(Dyn::null()),
            ValueRef::Blob(data) | ValueRef::Text(data) => Dyn::from_json(data),
            other => Err(Error::UnsupportedSourceType {
                source_type: other.data_type().to_string(),
            }),
        }
    }
}

impl ToSql for Dyn {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let json = self.to_json().map_err(to_sql_error)?;
        Ok(ToSqlOutput::Owned(rusqlite::types::Value::Blob(json)))
    }
}

impl FromSql for Dyn {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Dyn::from_sql(value).map_err(from_sql_error)
    }
}

// ============================================================================
// Nullable
// ============================================================================

/// Move `value` into a `T` when `S` and `T` are the same type.
fn cast<S: 'static, T: 'static>(value: S) -> Option<T> {
    let mut slot = Some(value);
    (&mut slot as &mut dyn Any)
        .downcast_mut::<Option<T>>()
        .and_then(Option::take)
}

/// Fallback once `T`'s own `FromSql` rejected the storage class.
fn coerce<T: 'static>(value: ValueRef<'_>) -> Option<T> {
    let coerced = match value {
        ValueRef::Blob(data) => std::str::from_utf8(data)
            .ok()
            .and_then(|s| cast::<String, T>(s.to_string())),
        ValueRef::Text(data) => cast::<Vec<u8>, T>(data.to_vec()),
        _ => None,
    };
    if coerced.is_some() {
        trace!("coerced {} column into {}", value.data_type(), type_name::<T>());
    }
    coerced
}

/// Return `T`'s own failure as is, unboxing it when `T` is a typx wrapper.
fn surface(e: FromSqlError) -> Error {
    match e {
        FromSqlError::Other(source) => match source.downcast::<Error>() {
            Ok(inner) => *inner,
            Err(source) => CodecError::Custom(source).into(),
        },
        other => Error::custom(other),
    }
}

impl<T: FromSql + Default + 'static> Nullable<T> {
    /// Decode a SQL column; `NULL` is absent.
    pub fn from_sql(value: ValueRef<'_>) -> Result<Self> {
        if let ValueRef::Null = value {
            return Ok(Self::absent());
        }
        match T::column_result(value) {
            Ok(v) => Ok(Self::new(v)),
            Err(FromSqlError::InvalidType) => coerce::<T>(value)
                .map(Self::new)
                .ok_or_else(|| Error::conversion(&value, type_name::<T>())),
            Err(e) => Err(surface(e)),
        }
    }
}

impl<T: ToSql> ToSql for Nullable<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.get() {
            Some(value) => value.to_sql(),
            None => Ok(ToSqlOutput::Owned(rusqlite::types::Value::Null)),
        }
    }
}

impl<T: FromSql + Default + 'static> FromSql for Nullable<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Nullable::from_sql(value).map_err(from_sql_error)
    }
}
