//! Conversions between JsonValue and serde_json::Value.

use crate::de::{float_token, string_token, unsigned_token};
use crate::{JsonValue, JsonValueError};

/// Folds the same way decoding does: sentinel strings become `Null` and
/// integral numbers become `Int`.
impl From<serde_json::Value> for JsonValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::String(s) => string_token(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    JsonValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    unsigned_token(u)
                } else {
                    float_token(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Object(map) => {
                JsonValue::Dictionary(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            serde_json::Value::Array(arr) => {
                JsonValue::Array(arr.into_iter().map(Into::into).collect())
            }
        }
    }
}

impl TryFrom<JsonValue> for serde_json::Value {
    type Error = JsonValueError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Ok(match value {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::String(s) => serde_json::Value::String(s),
            JsonValue::Int(i) => serde_json::Value::Number(i.into()),
            JsonValue::Double(d) => serde_json::Number::from_f64(d)
                .map(serde_json::Value::Number)
                .ok_or_else(|| JsonValueError::UnencodableValue {
                    message: format!("{} has no JSON representation", d),
                })?,
            JsonValue::Bool(b) => serde_json::Value::Bool(b),
            JsonValue::Dictionary(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| serde_json::Value::try_from(v).map(|v| (k, v)))
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Array(arr) => serde_json::Value::Array(
                arr.into_iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}
