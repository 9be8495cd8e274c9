//! The "address not found" sentinel.
//!
//! Guarded reads return a [`Lookup`]: either the value found at an address or
//! [`Lookup::NotFound`]. A stored [`Value::Null`](crate::Value::Null), `false`,
//! `0` or `""` is always `Found`; only an address with nothing stored at it is
//! `NotFound`.
//!
//! Callers should test with [`is_not_found`] or [`Lookup::is_not_found`]
//! rather than comparing against values of their own.

use crate::{
    Result, Value,
    errors::AccessError,
    ops,
    path::{Address, IntoAddress},
};

/// Marker for an address that holds no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotFound;

/// The single [`NotFound`] value.
pub const NOT_FOUND: NotFound = NotFound;

/// Result of a guarded read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<T> {
    /// A value is stored at the address.
    Found(T),
    /// Nothing is stored at the address.
    NotFound,
}

impl<T> Lookup<T> {
    /// Returns true if nothing was found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    /// Returns true if a value was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Converts into an `Option`, dropping the distinction from the sentinel.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// Returns the found value, or `fallback` in place of the sentinel.
    pub fn or(self, fallback: T) -> T {
        match self {
            Lookup::Found(value) => value,
            Lookup::NotFound => fallback,
        }
    }

    /// Returns the found value, or computes one in place of the sentinel.
    pub fn or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Lookup::Found(value) => value,
            Lookup::NotFound => fallback(),
        }
    }

    /// Maps a found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Borrows the found value.
    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Turns the sentinel into a [`AccessError::PathRequired`] for `address`.
    ///
    /// `message` replaces the default message when given.
    pub fn require(self, address: &Address, message: Option<&str>) -> Result<T> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::NotFound => Err(AccessError::path_required(address, message).into()),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

impl<T> From<NotFound> for Lookup<T> {
    fn from(_: NotFound) -> Self {
        Lookup::NotFound
    }
}

impl<T> PartialEq<NotFound> for Lookup<T> {
    fn eq(&self, _: &NotFound) -> bool {
        self.is_not_found()
    }
}

/// Returns true iff `lookup` is the sentinel.
pub fn is_not_found<T>(lookup: &Lookup<T>) -> bool {
    lookup.is_not_found()
}

/// Performs a guarded read of `address` and reports whether it found nothing.
///
/// ```
/// # use dotpath::{Doc, Value, lookup::not_found_at};
/// let root = Value::Doc(Doc::new().with("a", Value::Null));
/// assert!(!not_found_at(&root, "a")?);
/// assert!(not_found_at(&root, "b")?);
/// # Ok::<(), dotpath::Error>(())
/// ```
pub fn not_found_at(container: &Value, address: impl IntoAddress) -> Result<bool> {
    Ok(ops::get_if_exists(container, address)?.is_not_found())
}
