//! Encoding options shared by every save and load on a store.

use serde::{Deserialize, Serialize};

/// How saved JSON is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// No whitespace between tokens.
    #[default]
    Compact,
    /// Two-space indentation, one member per line.
    Pretty,
}

/// How `chrono::DateTime<Utc>` fields marked with `#[serde(with = "trunk_persist::dates")]`
/// are represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateEncoding {
    /// Fractional seconds since 2001-01-01T00:00:00Z, as a JSON number.
    /// Present-day dates keep sub-microsecond, not nanosecond, precision.
    #[default]
    Default,
    /// RFC 3339 text with whole seconds, e.g. `2024-03-01T12:00:00Z`.
    /// Fractional seconds are truncated on save, so a date with a sub-second
    /// part does not load back equal.
    Iso8601,
}

/// Options applied to every encode and decode a store performs.
///
/// Changing them only affects later operations; files already on disk are
/// left as they were written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EncodingOptions {
    pub output: OutputFormat,
    pub dates: DateEncoding,
}

impl EncodingOptions {
    pub fn new(output: OutputFormat, dates: DateEncoding) -> Self {
        Self { output, dates }
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_dates(mut self, dates: DateEncoding) -> Self {
        self.dates = dates;
        self
    }
}
