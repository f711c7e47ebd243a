//! Platform lookup of well-known directories.

use std::fmt;
use std::path::PathBuf;

/// The well-known storage roles a selector can point into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectoryRole {
    /// User-visible documents.
    Documents,
    /// Scratch space. The root is assumed to always exist.
    Temp,
    /// Per-user library directory.
    Library,
    /// Data that can be regenerated and may be purged by the system.
    Caches,
    /// Application data that is not user-visible.
    ApplicationSupport,
}

impl DirectoryRole {
    pub const ALL: [DirectoryRole; 5] = [
        DirectoryRole::Documents,
        DirectoryRole::Temp,
        DirectoryRole::Library,
        DirectoryRole::Caches,
        DirectoryRole::ApplicationSupport,
    ];

    /// Stable lowercase name, also used as the directory name by `RootedLocations`.
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryRole::Documents => "documents",
            DirectoryRole::Temp => "temp",
            DirectoryRole::Library => "library",
            DirectoryRole::Caches => "caches",
            DirectoryRole::ApplicationSupport => "application-support",
        }
    }
}

impl fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the root directory for a role.
///
/// Returning `None` means the platform has no such location; the resolver
/// reports that as `DirectoryError::SystemDirectoryUnavailable`.
pub trait Locations: Send + Sync {
    fn locate(&self, role: DirectoryRole) -> Option<PathBuf>;
}

/// The current user's platform directories, via the `dirs` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformLocations;

impl PlatformLocations {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "macos")]
    fn library_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join("Library"))
    }

    #[cfg(not(target_os = "macos"))]
    fn library_dir() -> Option<PathBuf> {
        dirs::data_local_dir()
    }
}

impl Locations for PlatformLocations {
    fn locate(&self, role: DirectoryRole) -> Option<PathBuf> {
        match role {
            DirectoryRole::Documents => dirs::document_dir(),
            DirectoryRole::Temp => Some(std::env::temp_dir()),
            DirectoryRole::Library => Self::library_dir(),
            DirectoryRole::Caches => dirs::cache_dir(),
            DirectoryRole::ApplicationSupport => dirs::data_dir(),
        }
    }
}

/// Every role lives in its own directory below a single root.
///
/// Useful for sandboxed deployments and for tests, where the root is a
/// throwaway directory. The temp role maps to `<root>/tmp`.
#[derive(Debug, Clone)]
pub struct RootedLocations {
    root: PathBuf,
}

impl RootedLocations {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Locations for RootedLocations {
    fn locate(&self, role: DirectoryRole) -> Option<PathBuf> {
        let name = match role {
            DirectoryRole::Temp => "tmp",
            other => other.name(),
        };
        Some(self.root.join(name))
    }
}
