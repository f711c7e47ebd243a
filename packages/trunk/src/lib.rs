//! Trunk: a uniform way to keep small pieces of application state on disk.
//!
//! Values are saved as plain JSON files in well-known platform directories and
//! loaded back into their Rust types, synchronously or with a completion
//! callback. Documents whose shape is not known up front can be handled with
//! [`JsonValue`].
//!
//! - [`directory`]: directory selectors and their resolution to paths
//! - [`json`]: the dynamic JSON value
//! - [`PersistentStore`] and friends: saving, loading and deleting records

pub use trunk_directory as directory;
pub use trunk_json_value as json;

pub use trunk_persist::*;
