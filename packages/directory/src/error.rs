use std::io;
use std::path::PathBuf;

use crate::DirectoryRole;

/// Errors raised while turning a `DirectorySelector` into a path.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    /// The platform reports no location for this role.
    #[error("no system directory available for {role}")]
    SystemDirectoryUnavailable { role: DirectoryRole },

    /// The directory did not exist and could not be created.
    #[error("unable to create directory {}: {source}", path.display())]
    UnableToCreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sub-path is absolute or escapes the role directory.
    #[error("invalid sub-path '{sub_path}': {message}")]
    InvalidSubPath { sub_path: String, message: String },
}
