//! Selector to path resolution.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::{
    DirectoryError, DirectoryRole, DirectorySelector, FileSystem, LocalFileSystem, Locations,
    PlatformLocations, RootedLocations,
};

/// Resolves `DirectorySelector`s to existing directories.
///
/// Nothing is cached: every call looks the role up again, checks for the
/// directory and creates it (with parents) when missing. Repeated calls with
/// an equal selector return the same path and only cost the directory check.
/// Anything other than a directory at the target is an error.
///
/// The bare temp root (`DirectorySelector::Temp(None)`) is returned as-is,
/// without the existence check or any creation.
#[derive(Clone)]
pub struct PathResolver {
    locations: Arc<dyn Locations>,
    filesystem: Arc<dyn FileSystem>,
}

impl PathResolver {
    pub fn new(locations: Arc<dyn Locations>, filesystem: Arc<dyn FileSystem>) -> Self {
        Self {
            locations,
            filesystem,
        }
    }

    /// The current user's platform directories on the local disk.
    pub fn platform() -> Self {
        Self::new(Arc::new(PlatformLocations), Arc::new(LocalFileSystem))
    }

    /// Every role below `root` on the local disk.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(RootedLocations::new(root)),
            Arc::new(LocalFileSystem),
        )
    }

    /// The filesystem directories are checked and created through.
    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.filesystem
    }

    pub fn resolve(&self, selector: &DirectorySelector) -> Result<PathBuf, DirectoryError> {
        let role = selector.role();
        let root = self
            .locations
            .locate(role)
            .ok_or(DirectoryError::SystemDirectoryUnavailable { role })?;

        let path = match selector.sub_path() {
            None if role == DirectoryRole::Temp => return Ok(root),
            None => root,
            Some(sub_path) => root.join(validate_sub_path(sub_path)?),
        };

        self.ensure_directory(path)
    }

    fn ensure_directory(&self, path: PathBuf) -> Result<PathBuf, DirectoryError> {
        if self.filesystem.is_dir(&path) {
            log::trace!("Directory {} already exists", path.display());
            return Ok(path);
        }

        log::debug!("Creating directory {}...", path.display());
        self.filesystem
            .create_dir_all(&path)
            .map_err(|source| DirectoryError::UnableToCreateDirectory {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

fn validate_sub_path(sub_path: &str) -> Result<&Path, DirectoryError> {
    let path = Path::new(sub_path);
    for component in path.components() {
        let message = match component {
            Component::Normal(_) | Component::CurDir => continue,
            Component::ParentDir => "parent components are not allowed",
            Component::RootDir | Component::Prefix(_) => "sub-path must be relative",
        };
        return Err(DirectoryError::InvalidSubPath {
            sub_path: sub_path.to_string(),
            message: message.to_string(),
        });
    }
    Ok(path)
}
