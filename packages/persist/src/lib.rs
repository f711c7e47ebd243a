//! Trunk Persistence: JSON Files in Platform Directories
//!
//! `PersistentStore` saves any `Serialize` value as `<filename>.json` in a
//! directory picked by a `DirectorySelector`, and loads it back into any
//! `DeserializeOwned` type. Every operation has a synchronous form returning a
//! `Result` and an `_async` form that runs on a background worker and hands the
//! same `Result` to a callback on the foreground context.
//!
//! The store is assembled from collaborators so each can be swapped:
//! - `PathResolver` (from `trunk-directory`): where files go, and the
//!   `FileSystem` they are written through
//! - `Codec`: JSON text <-> type-erased serde values
//! - `Dispatcher`: the background/foreground thread hop
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use trunk_persist::{DirectorySelector, ForegroundQueue, OutputFormat, PersistentStore};
//!
//! let foreground = ForegroundQueue::new();
//! let mut store = PersistentStore::platform(foreground.handle()).unwrap();
//! store.set_output_format(OutputFormat::Pretty);
//!
//! let junk = vec!["scissors", "matches", "tape"];
//! store.save(&junk, "junk", &DirectorySelector::application_support()).unwrap();
//!
//! store.load_async::<Vec<String>, _>("junk", DirectorySelector::application_support(), |result| {
//!     println!("loaded {:?}", result);
//! });
//! foreground.run_next(Duration::from_secs(5));
//! ```

mod codec;
pub mod dates;
mod dispatch;
mod error;
mod options;
mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use codec::{Codec, DecodeVisitor, JsonCodec};
pub use dispatch::{Dispatcher, ForegroundHandle, ForegroundQueue, Job, TokioDispatcher, Work};
pub use error::{CodecError, StoreError};
pub use options::{DateEncoding, EncodingOptions, OutputFormat};
pub use store::{PersistentStore, FILE_EXTENSION};

// Re-export the layers below for convenience
pub use trunk_directory::{
    DirectoryError, DirectoryRole, DirectorySelector, FileSystem, LocalFileSystem, Locations,
    PathResolver, PlatformLocations, RootedLocations,
};
pub use trunk_json_value::{JsonValue, JsonValueError};
