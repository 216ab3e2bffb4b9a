use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Extraction directory owned by one archive's processing cycle.
///
/// Removed on drop, whatever the outcome, unless `keep` was requested.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    keep: bool,
}

impl WorkDir {
    /// Reserve `<root>/_<archive file name>`, clearing anything stale there.
    ///
    /// The directory itself is created by extraction.
    pub fn acquire(root: &Path, archive: &Path, keep: bool) -> Result<Self> {
        let name = archive
            .file_name()
            .ok_or_else(|| {
                Error::path(
                    archive,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file path"),
                )
            })?
            .to_string_lossy();
        let path = root.join(format!("_{name}"));

        match std::fs::remove_dir_all(&path) {
            Ok(()) => debug!(path = %path.display(), "removed stale working directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&path, e)),
        }

        debug!(path = %path.display(), "working directory");
        Ok(Self { path, keep })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.keep {
            debug!(path = %self.path.display(), "keeping working directory");
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove working directory"),
        }
    }
}
