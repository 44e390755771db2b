//! Tri-state field model for decoded observation groups.
//!
//! Decoders report a group in one of three ways: the key is missing
//! entirely, the key is present with an explicit `null`, or the key carries
//! a value. Some slots render the middle state differently from the first
//! (cloud cover draws a slash glyph for present-but-null), so the three
//! states must not be conflated into a single `Option`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A decoded field with explicit absent / null / value states.
///
/// Struct fields of this type must be tagged
/// `#[serde(default, skip_serializing_if = "Field::is_absent")]`: a missing
/// key deserializes to [`Field::Absent`] via the default, a JSON `null` to
/// [`Field::Null`], and anything else to [`Field::Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// The group was not reported at all.
    #[default]
    Absent,
    /// The group was reported as an explicit null.
    Null,
    /// The group carries a decoded value.
    Value(T),
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

    /// The value, if one was reported.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
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

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }
}

impl<T: Copy> Field<T> {
    /// Copy the value out, if one was reported.
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; Absent comes from Default.
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Value(v) => v.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}
