//! Decoding.
//!
//! `JsonValue` deserializes with `deserialize_any`, so the shape of the input
//! picks the variant. The preference order is fixed:
//!
//! 1. `null` → `Null`
//! 2. strings → `String`, except sentinel nulls which become `Null`
//! 3. integers → `Int` (integral floats such as `3.0` included)
//! 4. other numbers → `Double`
//! 5. booleans → `Bool`
//! 6. objects → `Dictionary`, children decoded recursively
//! 7. arrays → `Array`, children decoded recursively
//!
//! Anything else is rejected.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::{JsonValue, JsonValueError};

/// Whether `s` is one of the strings external APIs send in place of `null`.
pub fn is_null_sentinel(s: &str) -> bool {
    let lower = s.to_lowercase();
    lower == "null" || lower == "<null>"
}

pub(crate) fn string_token(s: String) -> JsonValue {
    if is_null_sentinel(&s) {
        JsonValue::Null
    } else {
        JsonValue::String(s)
    }
}

pub(crate) fn unsigned_token(v: u64) -> JsonValue {
    match i64::try_from(v) {
        Ok(i) => JsonValue::Int(i),
        Err(_) => JsonValue::Double(v as f64),
    }
}

pub(crate) fn float_token(v: f64) -> JsonValue {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        JsonValue::Int(v as i64)
    } else {
        JsonValue::Double(v)
    }
}

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null, a string, a number, a boolean, an object or an array")
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        JsonValue::deserialize(deserializer)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonValue, E> {
        Ok(string_token(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonValue, E> {
        Ok(string_token(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonValue, E> {
        Ok(unsigned_token(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
        Ok(float_token(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<JsonValue, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, JsonValue>()? {
            map.insert(key, value);
        }
        Ok(JsonValue::Dictionary(map))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<JsonValue, A::Error> {
        let mut arr = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(value) = access.next_element::<JsonValue>()? {
            arr.push(value);
        }
        Ok(JsonValue::Array(arr))
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

/// Decode a JSON document from bytes.
pub fn from_slice(bytes: &[u8]) -> Result<JsonValue, JsonValueError> {
    serde_json::from_slice(bytes).map_err(|e| JsonValueError::UnrepresentableValue {
        message: e.to_string(),
    })
}

/// Decode a JSON document from text.
pub fn from_str(s: &str) -> Result<JsonValue, JsonValueError> {
    from_slice(s.as_bytes())
}
