//! Three-state model fields.
//!
//! Upstream payloads differ in which keys they carry: a team returned by the
//! search endpoint has an `id`, the same team returned by `teams/{id}` does
//! not. [`Field`] keeps "the key was missing" apart from "the key was null"
//! so callers can tell an unreported value from an empty one.

use serde::{Deserialize, Deserializer};

/// A model field as it appeared in the upstream payload.
///
/// Use with `#[serde(default)]` so a missing key becomes [`Field::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The key was not present in the payload.
    Absent,
    /// The key was present with a JSON `null`.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    /// Borrow the value, if there is one.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Take the value, collapsing `Absent` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(v),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }

    /// Use `other` when this field was not reported at all.
    pub fn or_else<F: FnOnce() -> Field<T>>(self, f: F) -> Field<T> {
        match self {
            Field::Absent => f(),
            present => present,
        }
    }
}

impl Field<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Field::Value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the key exists; missing keys go through `Default`.
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}
