/// [`FileSystem`] backed by the real disk.
///
/// Direct listings use a single `read_dir`. The recursive listing uses
/// `jwalk` in serial mode: recursion inside one subdirectory is never
/// parallelised, and links below the start directory are not followed.
///
/// In direct listings a link whose target is a directory is a directory.
/// Everything else (regular file, dangling link, socket, ...) counts as a
/// file with the length of its own metadata.
use super::{FileEntry, FileSystem};
use crate::error::FsError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_direct_files(&self, path: &Path) -> Result<Vec<FileEntry>, FsError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FsError::from_io(path, e))? {
            let entry = entry.map_err(|e| FsError::from_io(path, e))?;
            let entry_path = entry.path();
            if is_directory(&entry).map_err(|e| FsError::from_io(&entry_path, e))? {
                continue;
            }
            // DirEntry::metadata does not traverse symlinks.
            let meta = entry
                .metadata()
                .map_err(|e| FsError::from_io(&entry_path, e))?;
            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                length: meta.len(),
            });
        }
        Ok(files)
    }

    fn list_direct_subdirectories(&self, path: &Path) -> Result<Vec<PathBuf>, FsError> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FsError::from_io(path, e))? {
            let entry = entry.map_err(|e| FsError::from_io(path, e))?;
            let entry_path = entry.path();
            if is_directory(&entry).map_err(|e| FsError::from_io(&entry_path, e))? {
                dirs.push(entry_path);
            }
        }
        Ok(dirs)
    }

    fn list_all_files_recursively(&self, path: &Path) -> Result<Vec<FileEntry>, FsError> {
        // A linked directory is walked through its target.
        let start = if path.is_symlink() {
            fs::canonicalize(path).map_err(|e| FsError::from_io(path, e))?
        } else {
            path.to_path_buf()
        };
        let walker = jwalk::WalkDir::new(&start)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(jwalk::Parallelism::Serial);

        let mut files = Vec::new();
        for entry_result in walker {
            let entry = entry_result.map_err(|err| walk_error(path, err))?;
            if entry.file_type().is_dir() {
                continue;
            }
            let meta = entry.metadata().map_err(|err| walk_error(path, err))?;
            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                length: meta.len(),
            });
        }
        Ok(files)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Whether a `read_dir` entry is a directory, resolving links one step.
fn is_directory(entry: &fs::DirEntry) -> io::Result<bool> {
    let file_type = entry.file_type()?;
    if file_type.is_symlink() {
        // Dangling or unreadable links stay files.
        return Ok(fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir()));
    }
    Ok(file_type.is_dir())
}

/// Convert a `jwalk` error into an [`FsError`], keeping the path of the
/// entry that failed when jwalk knows it.
fn walk_error(root: &Path, err: jwalk::Error) -> FsError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let io_err = match err.io_error() {
        Some(inner) => io::Error::new(inner.kind(), err.to_string()),
        None => io::Error::other(err.to_string()),
    };
    FsError::from_io(&path, io_err)
}
