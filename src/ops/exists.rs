use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use super::{FileOps, check_path};
use crate::diagnostics::DiagnosticSink;
use crate::error::{FileOpsError, Result};

/// Whether `path` currently resolves (following links) to a regular file.
fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| metadata.is_file())
}

impl<S: DiagnosticSink> FileOps<S> {
    /// Make sure a regular file exists at `path`.
    ///
    /// Returns `true` if the file already existed or an empty one was created.
    /// See [`FileOps::try_ensure_exists`].
    pub fn ensure_exists(&self, path: &Path) -> bool {
        self.settle(self.try_ensure_exists(path)).is_some()
    }

    /// Make sure a regular file exists at `path`, creating an empty one if not.
    ///
    /// An existing file is never touched. The parent directory must already
    /// exist.
    ///
    /// # Errors
    ///
    /// - [`FileOpsError::InvalidPath`] for an empty path
    /// - [`FileOpsError::CreateFailed`] if the file cannot be created: missing
    ///   parent, missing permission, or something other than a regular file
    ///   already occupies the path
    pub fn try_ensure_exists(&self, path: &Path) -> Result<()> {
        check_path(path)?;

        if is_regular_file(path) {
            return Ok(());
        }

        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(()),
            // Someone else created it between the check and the open.
            Err(e) if e.kind() == ErrorKind::AlreadyExists && is_regular_file(path) => Ok(()),
            Err(source) => Err(FileOpsError::CreateFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
