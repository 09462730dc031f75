/// Filesystem access used by the scanner.
///
/// The scanner only ever talks to the filesystem through [`FileSystem`], so
/// the calculator and controller can be exercised against an in-memory tree
/// in tests and against [`LocalFs`] in production.
pub mod local;

#[cfg(test)]
pub(crate) mod memory;

pub use local::LocalFs;

use crate::error::FsError;
use std::path::{Path, PathBuf};

/// A single file as reported by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// Length in bytes.
    pub length: u64,
}

/// The operations the scanner needs from a filesystem.
///
/// Every listing fails with [`FsError::AccessDenied`] when the caller lacks
/// rights and [`FsError::NotFound`] when `path` does not exist.
pub trait FileSystem: Send + Sync {
    /// Files directly inside `path` (no descent).
    fn list_direct_files(&self, path: &Path) -> Result<Vec<FileEntry>, FsError>;

    /// Directories directly inside `path`, in the order the filesystem
    /// yields them.
    fn list_direct_subdirectories(&self, path: &Path) -> Result<Vec<PathBuf>, FsError>;

    /// Every file anywhere beneath `path`.
    ///
    /// This is one atomic call: a permission failure anywhere in the subtree
    /// fails the whole listing.
    fn list_all_files_recursively(&self, path: &Path) -> Result<Vec<FileEntry>, FsError>;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}
