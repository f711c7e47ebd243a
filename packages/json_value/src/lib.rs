//! Dynamic JSON Values for Trunk
//!
//! `JsonValue` holds any decoded JSON document without a fixed schema:
//! null, string, integer, double, boolean, dictionary and array. It decodes
//! with a fixed preference order (null, string, integer, double, boolean,
//! dictionary, array) and folds sentinel strings such as `"<null>"` into
//! `JsonValue::Null`.
//!
//! # Example
//!
//! ```rust
//! use trunk_json_value::JsonValue;
//!
//! let value = trunk_json_value::from_str(r#"{"lucky": 777, "nickname": "<null>"}"#).unwrap();
//!
//! assert_eq!(value.get("lucky").and_then(JsonValue::as_int), Some(777));
//! assert!(value.get("nickname").unwrap().is_null());
//! ```

mod convert;
mod de;
mod error;
mod ser;
mod value;

pub use de::{from_slice, from_str, is_null_sentinel};
pub use error::JsonValueError;
pub use ser::{to_string, to_vec, to_vec_pretty};
pub use value::{Dictionary, JsonValue};
