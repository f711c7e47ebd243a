//! The JsonValue type.

use std::collections::{BTreeMap, HashMap};

/// String-keyed children of a `JsonValue::Dictionary`.
pub type Dictionary = BTreeMap<String, JsonValue>;

/// A decoded JSON document of unknown shape.
///
/// Exactly one variant is active at a time; use the `as_*` accessors to pull
/// a typed value out, each returning `None` when a different variant is held.
///
/// # Equality
///
/// Derived structurally: dictionaries compare by key set and per-key value
/// (key order never matters), arrays compare position by position, and values
/// of different variants are never equal, so `Int(1) != Double(1.0)`.
///
/// # Sentinel nulls
///
/// Decoding folds the strings `"null"` and `"<null>"` (any case) into `Null`.
/// A `String("null")` built in code stays a `String`, but it will come back as
/// `Null` after an encode/decode round trip.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum JsonValue {
    /// JSON `null`, or a sentinel null string.
    #[default]
    Null,
    String(String),
    /// Integral number that fits in an `i64`.
    Int(i64),
    /// Any other number.
    Double(f64),
    Bool(bool),
    Dictionary(Dictionary),
    Array(Vec<JsonValue>),
}

impl JsonValue {
    /// Create an empty dictionary.
    pub fn dictionary() -> Self {
        JsonValue::Dictionary(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        JsonValue::Array(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            JsonValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as a double. `Int` values are widened.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            JsonValue::Double(d) => Some(*d),
            JsonValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            JsonValue::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Look up a key in a dictionary. `None` for missing keys and non-dictionaries.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_dictionary()?.get(key)
    }

    /// Look up a position in an array. `None` when out of bounds or not an array.
    pub fn at(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }
}

// Literal construction

impl From<bool> for JsonValue {
    fn from(v: bool) -> Self {
        JsonValue::Bool(v)
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue::Int(v)
    }
}

impl From<i32> for JsonValue {
    fn from(v: i32) -> Self {
        JsonValue::Int(v as i64)
    }
}

impl From<u32> for JsonValue {
    fn from(v: u32) -> Self {
        JsonValue::Int(v as i64)
    }
}

impl From<f64> for JsonValue {
    fn from(v: f64) -> Self {
        JsonValue::Double(v)
    }
}

impl From<String> for JsonValue {
    fn from(v: String) -> Self {
        JsonValue::String(v)
    }
}

impl From<&str> for JsonValue {
    fn from(v: &str) -> Self {
        JsonValue::String(v.to_string())
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(JsonValue::Null, Into::into)
    }
}

impl<T: Into<JsonValue>> From<Vec<T>> for JsonValue {
    fn from(v: Vec<T>) -> Self {
        JsonValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<JsonValue>> From<HashMap<String, T>> for JsonValue {
    fn from(v: HashMap<String, T>) -> Self {
        JsonValue::Dictionary(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<JsonValue>> From<BTreeMap<String, T>> for JsonValue {
    fn from(v: BTreeMap<String, T>) -> Self {
        JsonValue::Dictionary(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        JsonValue::Dictionary(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
