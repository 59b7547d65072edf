use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

use super::{FileOps, check_path};
use crate::config::CopyTarget;
use crate::diagnostics::DiagnosticSink;
use crate::error::{FileOpsError, Result, Step};
use crate::node::FileNode;
use crate::transfer::BUFFER_SIZE;

impl<S: DiagnosticSink> FileOps<S> {
    /// Copy the file at `src` to `dst`, replacing whatever is at `dst`.
    ///
    /// With the default [`CopyTarget::RequireExisting`] this returns `false`
    /// when `dst` does not exist yet. See [`FileOps::try_copy`].
    pub fn copy(&self, src: &Path, dst: &Path) -> bool {
        self.settle(self.try_copy(src, dst)).is_some()
    }

    /// Copy the file at `src` to `dst` and return the number of bytes copied.
    ///
    /// The steps run in order and stop at the first failure, without undoing
    /// earlier ones:
    ///
    /// 1. `src` must exist.
    /// 2. `dst` is deleted with [`FileOps::try_remove`]. Under
    ///    [`CopyTarget::RequireExisting`] an absent `dst` fails this step.
    ///    A link or special file at `dst` is unlinked instead; a link's
    ///    target is left alone.
    /// 3. `dst` is recreated with [`FileOps::try_ensure_exists`].
    /// 4. The content is streamed through a fixed 8 KiB buffer and flushed.
    ///
    /// A failure in step 4 leaves a partially written `dst` behind.
    ///
    /// # Errors
    ///
    /// - [`FileOpsError::InvalidPath`] if either path is empty
    /// - [`FileOpsError::NotFound`] if `src` does not exist, or `dst` does not
    ///   exist and absent destinations are not allowed
    /// - [`FileOpsError::Io`] if the metadata of either path cannot be read
    /// - any error of [`FileOps::try_remove`] or [`FileOps::try_ensure_exists`]
    ///   for `dst`
    /// - [`FileOpsError::Io`] if opening, reading, writing or flushing fails
    ///   (reading a directory as `src` fails here)
    pub fn try_copy(&self, src: &Path, dst: &Path) -> Result<u64> {
        check_path(src)?;
        check_path(dst)?;

        let source = FileNode::try_of(src).map_err(|e| FileOpsError::io(Step::Metadata, src, e))?;
        if !source.exists() {
            return Err(FileOpsError::NotFound(src.to_path_buf()));
        }

        let target = FileNode::try_of(dst).map_err(|e| FileOpsError::io(Step::Metadata, dst, e))?;
        if target == FileNode::Other {
            fs::remove_file(dst).map_err(|e| FileOpsError::io(Step::Delete, dst, e))?;
        } else {
            match self.try_remove(dst) {
                Ok(_) => {}
                Err(e)
                    if e.is_not_found() && self.options.copy_target == CopyTarget::AllowAbsent =>
                {
                    log::debug!(target: "fileops", "copy target {} is new", dst.display());
                }
                Err(e) => return Err(e),
            }
        }

        self.try_ensure_exists(dst)?;

        let mut reader = File::open(src).map_err(|e| FileOpsError::io(Step::OpenRead, src, e))?;
        let writer = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(dst)
            .map(|file| BufWriter::with_capacity(BUFFER_SIZE, file))
            .map_err(|e| FileOpsError::io(Step::OpenWrite, dst, e))?;

        self.transfer(&mut reader, writer, src, dst)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::OpsOptions;
    use crate::diagnostics::CollectingSink;

    fn allow_absent() -> FileOps {
        FileOps::new().with_options(OpsOptions {
            copy_target: CopyTarget::AllowAbsent,
            ..OpsOptions::default()
        })
    }

    #[test]
    fn test_copy_replaces_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");
        fs::write(&src, "new content").unwrap();
        fs::write(&dst, "old content that is longer").unwrap();

        assert!(FileOps::new().copy(&src, &dst));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new content");
        assert_eq!(fs::read_to_string(&src).unwrap(), "new content");
    }

    #[test]
    fn test_copy_replaces_directory_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst");
        fs::write(&src, "file").unwrap();
        fs::create_dir_all(dst.join("nested")).unwrap();
        fs::write(dst.join("nested/x.txt"), "x").unwrap();

        assert!(FileOps::new().copy(&src, &dst));
        assert!(dst.is_file());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "file");
    }

    #[test]
    fn test_copy_onto_absent_destination_fails_by_default() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("fresh.txt");
        fs::write(&src, "data").unwrap();
        let ops = FileOps::with_sink(CollectingSink::new());

        assert!(!ops.copy(&src, &dst));
        assert!(!dst.exists());
        assert!(ops.try_copy(&src, &dst).unwrap_err().is_not_found());
    }

    #[test]
    fn test_copy_onto_absent_destination_when_allowed() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("fresh.txt");
        fs::write(&src, "data").unwrap();

        assert_eq!(allow_absent().try_copy(&src, &dst).unwrap(), 4);
        assert_eq!(fs::read(&dst).unwrap(), b"data");
    }

    #[test]
    fn test_missing_source_fails_without_touching_destination() {
        let tmp = TempDir::new().unwrap();
        let dst = tmp.path().join("dst.txt");
        fs::write(&dst, "untouched").unwrap();

        let err = FileOps::new()
            .try_copy(&tmp.path().join("missing"), &dst)
            .unwrap_err();

        assert!(matches!(err, FileOpsError::NotFound(ref p) if p.ends_with("missing")));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "untouched");
    }

    #[test]
    fn test_destination_parent_missing_fails() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        fs::write(&src, "data").unwrap();

        let err = allow_absent()
            .try_copy(&src, &tmp.path().join("no/parent/dst.txt"))
            .unwrap_err();

        assert!(matches!(err, FileOpsError::CreateFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_source_fails_on_read() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("dir");
        fs::create_dir_all(&src).unwrap();
        let dst = tmp.path().join("dst.txt");
        fs::write(&dst, "old").unwrap();

        let err = FileOps::new().try_copy(&src, &dst).unwrap_err();

        assert!(matches!(
            err,
            FileOpsError::Io {
                step: Step::Read,
                ..
            }
        ));
        // The destination was already replaced by an empty file.
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_destination_is_unlinked() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let target = tmp.path().join("target.txt");
        let link = tmp.path().join("link.txt");
        fs::write(&src, "fresh").unwrap();
        fs::write(&target, "linked").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(FileOps::new().try_copy(&src, &link).unwrap(), 5);

        assert_eq!(FileNode::of(&link), FileNode::File);
        assert_eq!(fs::read_to_string(&link).unwrap(), "fresh");
        assert_eq!(fs::read_to_string(&target).unwrap(), "linked");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_source_is_not_reported_missing() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let sealed = tmp.path().join("sealed");
        fs::create_dir_all(&sealed).unwrap();
        let src = sealed.join("src.txt");
        fs::write(&src, "data").unwrap();
        let dst = tmp.path().join("dst.txt");
        fs::write(&dst, "untouched").unwrap();
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).unwrap();

        // Permissions are not enforced for root.
        if fs::symlink_metadata(&src).is_ok() {
            fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = FileOps::new().try_copy(&src, &dst);
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(
            result,
            Err(FileOpsError::Io {
                step: Step::Metadata,
                ..
            })
        ));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "untouched");
    }
}
