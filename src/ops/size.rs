use std::io;
use std::path::Path;

use walkdir::WalkDir;

use super::{FileOps, check_path};
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::{FileOpsError, Result, Step};
use crate::node::FileNode;

/// Convert a traversal error into a listing error for the entry it concerns.
fn walk_error(root: &Path, error: walkdir::Error) -> FileOpsError {
    let path = error.path().unwrap_or(root).to_path_buf();
    FileOpsError::ReadDir {
        path,
        source: io::Error::from(error),
    }
}

impl<S: DiagnosticSink> FileOps<S> {
    /// Size in bytes of the file or directory tree at `path`.
    ///
    /// - absent path: `0`
    /// - regular file: its length
    /// - directory: the sum of all regular files below it
    ///
    /// Links and special files count as `0` and are never followed. Entries
    /// that cannot be read (for example a directory without list permission)
    /// also count as `0`, as does a root whose metadata cannot be read; each
    /// one is reported to the sink as a warning. Use [`FileOps::try_size`] to
    /// get an error instead.
    pub fn size(&self, path: &Path) -> u64 {
        if let Err(e) = check_path(path) {
            self.sink.report(Severity::Error, &e);
            return 0;
        }

        let node = match FileNode::try_of(path) {
            Ok(node) => node,
            Err(e) => {
                let error = FileOpsError::io(Step::Metadata, path, e);
                self.sink.report(Severity::Warning, &error);
                return 0;
            }
        };

        match node {
            FileNode::Absent | FileNode::Other => 0,
            FileNode::File => self.settle(file_len(path)).unwrap_or(0),
            FileNode::Directory => {
                let mut total = 0u64;

                for entry in WalkDir::new(path).min_depth(1) {
                    let entry = match entry {
                        Ok(entry) => entry,
                        Err(e) => {
                            self.sink.report(Severity::Warning, &walk_error(path, e));
                            continue;
                        }
                    };

                    if entry.file_type().is_file() {
                        match entry.metadata() {
                            Ok(metadata) => total += metadata.len(),
                            Err(e) => self.sink.report(Severity::Warning, &walk_error(path, e)),
                        }
                    }
                }

                total
            }
        }
    }

    /// Size in bytes of the file or directory tree at `path`, failing on the
    /// first unreadable entry.
    ///
    /// # Errors
    ///
    /// - [`FileOpsError::InvalidPath`] for an empty path
    /// - [`FileOpsError::Io`] if the root's metadata cannot be read
    /// - [`FileOpsError::ReadDir`] if a directory below the root cannot be
    ///   listed or an entry's metadata cannot be read
    pub fn try_size(&self, path: &Path) -> Result<u64> {
        check_path(path)?;

        let node = FileNode::try_of(path).map_err(|e| FileOpsError::io(Step::Metadata, path, e))?;

        match node {
            FileNode::Absent | FileNode::Other => Ok(0),
            FileNode::File => file_len(path),
            FileNode::Directory => {
                let mut total = 0u64;

                for entry in WalkDir::new(path).min_depth(1) {
                    let entry = entry.map_err(|e| walk_error(path, e))?;
                    if entry.file_type().is_file() {
                        total += entry.metadata().map_err(|e| walk_error(path, e))?.len();
                    }
                }

                Ok(total)
            }
        }
    }
}

fn file_len(path: &Path) -> Result<u64> {
    std::fs::symlink_metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| FileOpsError::io(Step::Metadata, path, e))
}
