/// Per-folder scan results.
use crate::fs::FileEntry;
use compact_str::CompactString;
use std::path::{Path, PathBuf};

/// Aggregate size and file count of one subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirTotals {
    pub size_bytes: u64,
    pub file_count: u64,
}

impl DirTotals {
    /// Totals of a flat list of files.
    pub fn from_files(files: &[FileEntry]) -> Self {
        let mut totals = Self::default();
        totals.add_files(files);
        totals
    }

    pub fn add_files(&mut self, files: &[FileEntry]) {
        self.size_bytes += files.iter().map(|f| f.length).sum::<u64>();
        self.file_count += files.len() as u64;
    }
}

/// One entry per scanned top-level subdirectory.
///
/// `(0, 0)` means the subtree is empty or its root could not be read; the
/// two cases are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySizeResult {
    /// The directory's own name, not its path.
    pub name: CompactString,
    pub full_path: PathBuf,
    pub size_bytes: u64,
    pub file_count: u64,
}

impl DirectorySizeResult {
    pub fn new(path: &Path, totals: DirTotals) -> Self {
        Self {
            name: display_name(path),
            full_path: path.to_path_buf(),
            size_bytes: totals.size_bytes,
            file_count: totals.file_count,
        }
    }
}

/// The last path component, or the whole path for roots such as `/`.
fn display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}
