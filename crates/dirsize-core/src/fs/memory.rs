/// Deterministic in-memory [`FileSystem`] for unit tests.
///
/// Children keep insertion order so tests can reason about enumeration
/// order. Directories can be marked denied or vanished, and a gate can hold
/// the worker inside a listing until the test releases it.
use super::{FileEntry, FileSystem};
use crate::error::FsError;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct DirNode {
    files: Vec<FileEntry>,
    subdirs: Vec<PathBuf>,
    denied: bool,
    vanished: bool,
}

struct Gate {
    entered: Sender<PathBuf>,
    release: Receiver<()>,
}

#[derive(Default)]
pub(crate) struct MemoryFs {
    dirs: HashMap<PathBuf, DirNode>,
    gates: HashMap<PathBuf, Gate>,
    /// Every directory passed to `list_direct_files`, in call order.
    visited: Mutex<Vec<PathBuf>>,
}

impl MemoryFs {
    pub(crate) fn new(root: &str) -> Self {
        let mut fs = Self::default();
        fs.dirs.insert(PathBuf::from(root), DirNode::default());
        fs
    }

    /// Add a directory; its parent must already exist.
    pub(crate) fn dir(mut self, path: &str) -> Self {
        let path = PathBuf::from(path);
        let parent = path.parent().expect("dir needs a parent").to_path_buf();
        self.dirs
            .get_mut(&parent)
            .expect("parent dir missing")
            .subdirs
            .push(path.clone());
        self.dirs.insert(path, DirNode::default());
        self
    }

    pub(crate) fn file(mut self, path: &str, length: u64) -> Self {
        let path = PathBuf::from(path);
        let parent = path.parent().expect("file needs a parent").to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.dirs
            .get_mut(&parent)
            .expect("parent dir missing")
            .files
            .push(FileEntry { name, length });
        self
    }

    /// Every listing of `path` fails with access denied.
    pub(crate) fn deny(mut self, path: &str) -> Self {
        self.dirs.get_mut(Path::new(path)).expect("unknown dir").denied = true;
        self
    }

    /// Every listing of `path` fails with not found.
    pub(crate) fn vanish(mut self, path: &str) -> Self {
        self.dirs.get_mut(Path::new(path)).expect("unknown dir").vanished = true;
        self
    }

    /// Block `list_direct_files(path)` until a message arrives on the
    /// returned sender. The receiver reports when the worker got there.
    pub(crate) fn gate(&mut self, path: &str) -> (Sender<()>, Receiver<PathBuf>) {
        let (release_tx, release_rx) = crossbeam_channel::unbounded();
        let (entered_tx, entered_rx) = crossbeam_channel::unbounded();
        self.gates.insert(
            PathBuf::from(path),
            Gate {
                entered: entered_tx,
                release: release_rx,
            },
        );
        (release_tx, entered_rx)
    }

    pub(crate) fn visited(&self) -> Vec<PathBuf> {
        self.visited.lock().clone()
    }

    fn node(&self, path: &Path) -> Result<&DirNode, FsError> {
        let node = self.dirs.get(path).ok_or_else(|| FsError::NotFound {
            path: path.to_path_buf(),
        })?;
        if node.vanished {
            return Err(FsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if node.denied {
            return Err(FsError::AccessDenied {
                path: path.to_path_buf(),
            });
        }
        Ok(node)
    }

    fn collect(&self, path: &Path, out: &mut Vec<FileEntry>) -> Result<(), FsError> {
        let node = self.node(path)?;
        out.extend(node.files.iter().cloned());
        for sub in &node.subdirs {
            self.collect(sub, out)?;
        }
        Ok(())
    }
}

impl FileSystem for MemoryFs {
    fn list_direct_files(&self, path: &Path) -> Result<Vec<FileEntry>, FsError> {
        self.visited.lock().push(path.to_path_buf());
        if let Some(gate) = self.gates.get(path) {
            let _ = gate.entered.send(path.to_path_buf());
            let _ = gate.release.recv();
        }
        Ok(self.node(path)?.files.clone())
    }

    fn list_direct_subdirectories(&self, path: &Path) -> Result<Vec<PathBuf>, FsError> {
        Ok(self.node(path)?.subdirs.clone())
    }

    fn list_all_files_recursively(&self, path: &Path) -> Result<Vec<FileEntry>, FsError> {
        let mut out = Vec::new();
        self.collect(path, &mut out)?;
        Ok(out)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }
}
