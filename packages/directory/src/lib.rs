//! Trunk Directories: Where Stored Records Live
//!
//! This layer maps a logical storage location to a concrete directory:
//! - `DirectorySelector`: a well-known role (documents, caches, ...) plus an
//!   optional relative sub-path
//! - `Locations`: the platform lookup that turns a role into a root directory
//! - `PathResolver`: joins the two and creates missing directories
//! - `FileSystem`: the filesystem primitives everything above is built on
//!
//! `PathResolver` is the only place that creates directories. Stores built on
//! top of it never call `create_dir_all` themselves.
//!
//! # Example
//!
//! ```rust,no_run
//! use trunk_directory::{DirectorySelector, PathResolver};
//!
//! let resolver = PathResolver::platform();
//! let dir = resolver.resolve(&DirectorySelector::caches_at("thumbnails")).unwrap();
//! assert!(dir.is_dir());
//! ```

mod error;
mod fs;
mod locations;
mod resolver;
mod selector;

pub use error::DirectoryError;
pub use fs::{FileSystem, LocalFileSystem};
pub use locations::{DirectoryRole, Locations, PlatformLocations, RootedLocations};
pub use resolver::PathResolver;
pub use selector::DirectorySelector;
