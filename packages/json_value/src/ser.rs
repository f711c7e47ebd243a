//! Encoding.

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{JsonValue, JsonValueError};

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Int(i) => serializer.serialize_i64(*i),
            JsonValue::Double(d) if !d.is_finite() => Err(S::Error::custom(format!(
                "{} has no JSON representation",
                d
            ))),
            JsonValue::Double(d) => serializer.serialize_f64(*d),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Dictionary(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            JsonValue::Array(arr) => {
                let mut out = serializer.serialize_seq(Some(arr.len()))?;
                for value in arr {
                    out.serialize_element(value)?;
                }
                out.end()
            }
        }
    }
}

fn unencodable(e: serde_json::Error) -> JsonValueError {
    JsonValueError::UnencodableValue {
        message: e.to_string(),
    }
}

/// Encode as compact JSON bytes.
pub fn to_vec(value: &JsonValue) -> Result<Vec<u8>, JsonValueError> {
    serde_json::to_vec(value).map_err(unencodable)
}

/// Encode as indented JSON bytes.
pub fn to_vec_pretty(value: &JsonValue) -> Result<Vec<u8>, JsonValueError> {
    serde_json::to_vec_pretty(value).map_err(unencodable)
}

/// Encode as compact JSON text.
pub fn to_string(value: &JsonValue) -> Result<String, JsonValueError> {
    serde_json::to_string(value).map_err(unencodable)
}
