use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{FileOps, check_path};
use crate::config::RemoveMode;
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::{FileOpsError, Result, Step};
use crate::node::FileNode;

/// Outcome of a successful recursive delete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RemoveReport {
    /// Entries deleted, the root included.
    pub removed: usize,

    /// Nested failures swallowed in lenient mode. A directory only goes away
    /// once it is empty, so this is normally `0` when the root was removed.
    pub failed: usize,
}

impl<S: DiagnosticSink> FileOps<S> {
    /// Delete the file or directory tree at `path`.
    ///
    /// Returns `false` when nothing exists at `path`: an absent path is not an
    /// error, but it is not a successful delete either, so callers must not
    /// read `false` as "something went wrong". See [`FileOps::try_remove`].
    pub fn remove(&self, path: &Path) -> bool {
        self.settle(self.try_remove(path)).is_some()
    }

    /// Delete the file or directory tree at `path`.
    ///
    /// Directories are emptied depth-first and then removed. Links inside the
    /// tree are unlinked, never followed. In [`RemoveMode::Lenient`] an entry
    /// that cannot be deleted is reported to the sink and its siblings are
    /// still processed, which can leave a partially cleaned tree behind; in
    /// [`RemoveMode::Strict`] the first such failure is returned.
    ///
    /// # Errors
    ///
    /// - [`FileOpsError::InvalidPath`] for an empty path
    /// - [`FileOpsError::NotFound`] if nothing exists at `path`
    /// - [`FileOpsError::Unsupported`] if `path` is a link or special file
    /// - [`FileOpsError::Io`] if a file root cannot be deleted, or (strict
    ///   mode) a nested entry cannot be deleted
    /// - [`FileOpsError::ReadDir`] (strict mode) if a directory cannot be listed
    /// - [`FileOpsError::RemoveFailed`] if the emptied root directory cannot
    ///   be deleted
    pub fn try_remove(&self, path: &Path) -> Result<RemoveReport> {
        check_path(path)?;

        let node = FileNode::try_of(path).map_err(|e| FileOpsError::io(Step::Metadata, path, e))?;

        match node {
            FileNode::Absent => Err(FileOpsError::NotFound(path.to_path_buf())),
            FileNode::Other => Err(FileOpsError::Unsupported(path.to_path_buf())),
            FileNode::File => fs::remove_file(path)
                .map(|()| RemoveReport {
                    removed: 1,
                    failed: 0,
                })
                .map_err(|e| FileOpsError::io(Step::Delete, path, e)),
            FileNode::Directory => {
                let mut report = RemoveReport::default();
                self.remove_children(path, &mut report)?;

                match fs::remove_dir(path) {
                    Ok(()) => {
                        report.removed += 1;
                        Ok(report)
                    }
                    Err(source) => Err(FileOpsError::RemoveFailed {
                        path: path.to_path_buf(),
                        failed: report.failed,
                        source,
                    }),
                }
            }
        }
    }

    /// Delete everything inside `dir`, depth-first.
    fn remove_children(&self, dir: &Path, report: &mut RemoveReport) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(source) => {
                return self.nested_failure(
                    report,
                    FileOpsError::ReadDir {
                        path: dir.to_path_buf(),
                        source,
                    },
                );
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.nested_failure(
                        report,
                        FileOpsError::ReadDir {
                            path: dir.to_path_buf(),
                            source,
                        },
                    )?;
                    continue;
                }
            };

            let child = entry.path();
            let result = match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {
                    self.remove_children(&child, report)?;
                    fs::remove_dir(&child)
                }
                Ok(_) => fs::remove_file(&child),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    self.nested_failure(report, FileOpsError::io(Step::Delete, &child, e))?;
                }
            }
        }

        Ok(())
    }

    /// Count a nested failure and either swallow it or abort, per the mode.
    fn nested_failure(&self, report: &mut RemoveReport, error: FileOpsError) -> Result<()> {
        report.failed += 1;

        match self.options.remove_mode {
            RemoveMode::Strict => Err(error),
            RemoveMode::Lenient => {
                self.sink.report(Severity::Warning, &error);
                Ok(())
            }
        }
    }
}
