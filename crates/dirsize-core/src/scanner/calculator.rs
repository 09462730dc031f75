/// Size and file count of a single directory.
///
/// Direct files are listed first, then each direct subdirectory is listed
/// recursively in one call. Accounting is all-or-nothing per direct
/// subdirectory: a permission failure anywhere under it drops that whole
/// subtree, while its siblings still count.
use crate::error::FsError;
use crate::fs::FileSystem;
use crate::model::DirTotals;
use std::path::Path;
use tracing::debug;

pub struct DirectorySizeCalculator<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> DirectorySizeCalculator<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Compute the totals for `dir`, which the caller has checked exists.
    ///
    /// Access-denied is never returned: an unreadable `dir` yields
    /// `(0, 0)` and unreadable subtrees are skipped. Other errors (such as
    /// the directory vanishing mid-scan) propagate.
    pub fn compute(&self, dir: &Path) -> Result<DirTotals, FsError> {
        let files = match self.fs.list_direct_files(dir) {
            Ok(files) => files,
            Err(err) if err.is_access_denied() => {
                debug!("Skipping unreadable directory {}", dir.display());
                return Ok(DirTotals::default());
            }
            Err(err) => return Err(err),
        };
        let mut totals = DirTotals::from_files(&files);

        let subdirs = match self.fs.list_direct_subdirectories(dir) {
            Ok(subdirs) => subdirs,
            Err(err) if err.is_access_denied() => {
                // Same guarded block as the direct files: nothing counts.
                debug!("Cannot list subdirectories of {}", dir.display());
                return Ok(DirTotals::default());
            }
            Err(err) => return Err(err),
        };

        for sub in subdirs {
            match self.fs.list_all_files_recursively(&sub) {
                Ok(all) => totals.add_files(&all),
                Err(err) if err.is_access_denied() => {
                    debug!("Skipping subtree {}: {err}", sub.display());
                }
                Err(err) => return Err(err),
            }
        }

        Ok(totals)
    }
}
