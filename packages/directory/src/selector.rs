//! Logical directory selectors.

use std::fmt;

use crate::DirectoryRole;

/// A well-known storage location plus an optional path relative to it.
///
/// Selectors are plain values: build one at the call site and hand it to
/// `PathResolver::resolve` (or to a store operation, which resolves it for you).
/// Two selectors are equal when both the role and the sub-path match. An empty
/// sub-path is normalized to `None` by the `*_at` constructors.
///
/// ```rust
/// use trunk_directory::{DirectoryRole, DirectorySelector};
///
/// let sel = DirectorySelector::documents_at("exports/2024");
/// assert_eq!(sel.role(), DirectoryRole::Documents);
/// assert_eq!(sel.sub_path(), Some("exports/2024"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectorySelector {
    Documents(Option<String>),
    Temp(Option<String>),
    Library(Option<String>),
    Caches(Option<String>),
    ApplicationSupport(Option<String>),
}

fn non_empty(sub_path: impl Into<String>) -> Option<String> {
    let sub_path = sub_path.into();
    if sub_path.is_empty() {
        None
    } else {
        Some(sub_path)
    }
}

impl DirectorySelector {
    /// Build a selector from a role and an optional sub-path.
    pub fn new(role: DirectoryRole, sub_path: Option<String>) -> Self {
        let sub_path = sub_path.and_then(non_empty);
        match role {
            DirectoryRole::Documents => DirectorySelector::Documents(sub_path),
            DirectoryRole::Temp => DirectorySelector::Temp(sub_path),
            DirectoryRole::Library => DirectorySelector::Library(sub_path),
            DirectoryRole::Caches => DirectorySelector::Caches(sub_path),
            DirectoryRole::ApplicationSupport => DirectorySelector::ApplicationSupport(sub_path),
        }
    }

    pub fn documents() -> Self {
        DirectorySelector::Documents(None)
    }

    pub fn documents_at(sub_path: impl Into<String>) -> Self {
        DirectorySelector::Documents(non_empty(sub_path))
    }

    pub fn temp() -> Self {
        DirectorySelector::Temp(None)
    }

    pub fn temp_at(sub_path: impl Into<String>) -> Self {
        DirectorySelector::Temp(non_empty(sub_path))
    }

    pub fn library() -> Self {
        DirectorySelector::Library(None)
    }

    pub fn library_at(sub_path: impl Into<String>) -> Self {
        DirectorySelector::Library(non_empty(sub_path))
    }

    pub fn caches() -> Self {
        DirectorySelector::Caches(None)
    }

    pub fn caches_at(sub_path: impl Into<String>) -> Self {
        DirectorySelector::Caches(non_empty(sub_path))
    }

    pub fn application_support() -> Self {
        DirectorySelector::ApplicationSupport(None)
    }

    pub fn application_support_at(sub_path: impl Into<String>) -> Self {
        DirectorySelector::ApplicationSupport(non_empty(sub_path))
    }

    /// The storage role this selector points into.
    pub fn role(&self) -> DirectoryRole {
        match self {
            DirectorySelector::Documents(_) => DirectoryRole::Documents,
            DirectorySelector::Temp(_) => DirectoryRole::Temp,
            DirectorySelector::Library(_) => DirectoryRole::Library,
            DirectorySelector::Caches(_) => DirectoryRole::Caches,
            DirectorySelector::ApplicationSupport(_) => DirectoryRole::ApplicationSupport,
        }
    }

    /// The relative path below the role directory, if any.
    pub fn sub_path(&self) -> Option<&str> {
        match self {
            DirectorySelector::Documents(sub)
            | DirectorySelector::Temp(sub)
            | DirectorySelector::Library(sub)
            | DirectorySelector::Caches(sub)
            | DirectorySelector::ApplicationSupport(sub) => {
                sub.as_deref().filter(|s| !s.is_empty())
            }
        }
    }
}

impl fmt::Display for DirectorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_path() {
            Some(sub) => write!(f, "{}/{}", self.role(), sub),
            None => write!(f, "{}", self.role()),
        }
    }
}
