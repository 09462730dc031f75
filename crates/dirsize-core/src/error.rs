/// Error types for the scanning engine.
///
/// Permission failures are expected during a scan and are recovered close
/// to where they happen; `FsError::is_access_denied` is the single place
/// that classification is decided.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure reported by a [`FileSystem`](crate::fs::FileSystem) implementation.
#[derive(Debug, Error)]
pub enum FsError {
    /// The caller lacks rights to list or read the entry.
    #[error("access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    /// The entry does not exist (or disappeared while scanning).
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Any other I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify a raw `io::Error` raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::AccessDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// `true` for permission failures, which the scanner absorbs.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// The path the failure was raised for.
    pub fn path(&self) -> &Path {
        match self {
            Self::AccessDenied { path } | Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }
}

/// Errors surfaced by the scan controller.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root is empty or is not an existing directory. Raised
    /// synchronously, before any worker is spawned.
    #[error("not an existing directory: {:?}", path)]
    InvalidRoot { path: PathBuf },

    /// An unexpected filesystem failure that ended the scan.
    #[error(transparent)]
    Filesystem(#[from] FsError),

    /// The worker thread could not be spawned.
    #[error("failed to start scan worker: {0}")]
    Spawn(#[source] io::Error),
}

/// Errors writing a results report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot write report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_kinds() {
        let p = Path::new("/x");
        let denied = FsError::from_io(p, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(denied.is_access_denied());

        let missing = FsError::from_io(p, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, FsError::NotFound { .. }));
        assert!(!missing.is_access_denied());

        let other = FsError::from_io(p, io::Error::other("disk on fire"));
        assert!(matches!(other, FsError::Io { .. }));
        assert_eq!(other.path(), p);
    }

    #[test]
    fn test_scan_error_wraps_fs_error() {
        let err: ScanError = FsError::NotFound {
            path: PathBuf::from("/gone"),
        }
        .into();
        assert_eq!(err.to_string(), "path not found: /gone");
    }
}
