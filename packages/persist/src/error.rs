use std::io;
use std::path::PathBuf;

use trunk_directory::DirectoryError;

/// Errors from a `Codec`.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Serde(#[from] erased_serde::Error),

    #[error("{message}")]
    Other { message: String },
}

/// Errors from `PersistentStore` operations.
///
/// Every store operation reports failure through this type; nothing is
/// retried or swallowed.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("invalid filename '{filename}': {message}")]
    InvalidFilename { filename: String, message: String },

    #[error("refusing to delete protected directory {}", path.display())]
    ProtectedDirectory { path: PathBuf },

    #[error("encoding failed: {source}")]
    EncodingFailed {
        #[source]
        source: CodecError,
    },

    #[error("write to {} failed: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read from {} failed: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decoding {} failed: {source}", path.display())]
    DecodingFailed {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("delete of {} failed: {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True when a read or delete failed because nothing was at the path.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::ReadFailed { source, .. } | StoreError::DeleteFailed { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// The file or directory the failed operation was working on, if known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            StoreError::ProtectedDirectory { path }
            | StoreError::WriteFailed { path, .. }
            | StoreError::ReadFailed { path, .. }
            | StoreError::DecodingFailed { path, .. }
            | StoreError::DeleteFailed { path, .. } => Some(path.as_path()),
            StoreError::Directory(DirectoryError::UnableToCreateDirectory { path, .. }) => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}
