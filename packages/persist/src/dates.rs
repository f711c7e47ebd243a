//! Serde helpers for dates in stored values.
//!
//! Mark `DateTime<Utc>` fields with `#[serde(with = "trunk_persist::dates")]`
//! (or `dates::option` for `Option<DateTime<Utc>>`). The representation follows
//! the `DateEncoding` of the store doing the save or load; outside a store
//! operation `DateEncoding::Default` is used.
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Session {
//!     #[serde(with = "trunk_persist::dates")]
//!     started: DateTime<Utc>,
//!     #[serde(default, with = "trunk_persist::dates::option")]
//!     ended: Option<DateTime<Utc>>,
//! }
//! ```

use std::cell::Cell;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::DateEncoding;

/// 2001-01-01T00:00:00Z as a Unix timestamp.
const REFERENCE_EPOCH: i64 = 978_307_200;

thread_local! {
    static ACTIVE: Cell<DateEncoding> = const { Cell::new(DateEncoding::Default) };
}

struct Restore(DateEncoding);

impl Drop for Restore {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(self.0));
    }
}

/// Run `f` with `encoding` active on this thread.
pub(crate) fn scoped<R>(encoding: DateEncoding, f: impl FnOnce() -> R) -> R {
    let previous = ACTIVE.with(|active| active.replace(encoding));
    let _restore = Restore(previous);
    f()
}

/// The encoding dates are currently written and read with on this thread.
pub fn active() -> DateEncoding {
    ACTIVE.with(Cell::get)
}

fn to_reference_seconds(date: &DateTime<Utc>) -> f64 {
    (date.timestamp() - REFERENCE_EPOCH) as f64 + f64::from(date.timestamp_subsec_nanos()) / 1e9
}

fn from_reference_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp((whole as i64).checked_add(REFERENCE_EPOCH)?, nanos)
}

pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    match active() {
        DateEncoding::Default => serializer.serialize_f64(to_reference_seconds(date)),
        DateEncoding::Iso8601 => {
            serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
        }
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    match active() {
        DateEncoding::Default => {
            let seconds = f64::deserialize(deserializer)?;
            from_reference_seconds(seconds)
                .ok_or_else(|| D::Error::custom(format!("date {} is out of range", seconds)))
        }
        DateEncoding::Iso8601 => {
            let text = String::deserialize(deserializer)?;
            DateTime::parse_from_rfc3339(&text)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|e| D::Error::custom(format!("invalid ISO 8601 date '{}': {}", text, e)))
        }
    }
}

/// The same helpers for `Option<DateTime<Utc>>`; `None` is `null`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super")] DateTime<Utc>);

        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(date)| date))
    }
}
