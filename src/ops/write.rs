use std::io::{Read, Write};
use std::path::Path;

use super::{FileOps, STREAM_LABEL, check_path, open_for_write};
use crate::diagnostics::DiagnosticSink;
use crate::error::{FileOpsError, Result, Step};
use crate::release::{Release, release_all};

impl<S: DiagnosticSink> FileOps<S> {
    /// Write everything from `reader` into the file at `path`.
    ///
    /// See [`FileOps::try_write_bytes`].
    pub fn write_bytes<R: Read>(&self, path: &Path, reader: R, append: bool) -> bool {
        self.settle(self.try_write_bytes(path, reader, append)).is_some()
    }

    /// Write everything from `reader` into the file at `path` and return the
    /// number of bytes written.
    ///
    /// The file is created first if needed (its parent must exist). Whether
    /// `append` appends or truncates is decided by
    /// [`OpsOptions::bytes_append`](crate::config::OpsOptions::bytes_append).
    /// The reader is consumed and dropped before this returns, whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// - [`FileOpsError::InvalidPath`] for an empty path
    /// - [`FileOpsError::CreateFailed`] if the file cannot be created
    /// - [`FileOpsError::Io`] if opening, reading, writing or flushing fails
    pub fn try_write_bytes<R: Read>(
        &self,
        path: &Path,
        mut reader: R,
        append: bool,
    ) -> Result<u64> {
        check_path(path)?;
        self.try_ensure_exists(path)?;

        let writer = open_for_write(path, self.options.bytes_append.appends(append))?;
        self.transfer(&mut reader, writer, Path::new(STREAM_LABEL), path)
    }

    /// Write `text` into the file at `path`.
    ///
    /// See [`FileOps::try_write_text`].
    pub fn write_text(&self, path: &Path, text: &str, append: bool) -> bool {
        self.settle(self.try_write_text(path, text, append)).is_some()
    }

    /// Write `text` into the file at `path` in one go.
    ///
    /// The file is created if needed (its parent must exist). Whether `append`
    /// appends or truncates is decided by
    /// [`OpsOptions::text_append`](crate::config::OpsOptions::text_append).
    /// Nothing is cleaned up if the write fails halfway.
    ///
    /// # Errors
    ///
    /// - [`FileOpsError::InvalidPath`] for an empty path
    /// - [`FileOpsError::Io`] if opening, writing or flushing fails
    pub fn try_write_text(&self, path: &Path, text: &str, append: bool) -> Result<()> {
        check_path(path)?;

        let mut writer = open_for_write(path, self.options.text_append.appends(append))?;

        let outcome = writer
            .write_all(text.as_bytes())
            .map_err(|e| FileOpsError::io(Step::Write, path, e))
            .and_then(|()| {
                writer
                    .flush()
                    .map_err(|e| FileOpsError::io(Step::Flush, path, e))
            });

        release_all([Some(&mut writer as &mut dyn Release)], path, &self.sink);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use tempfile::TempDir;

    use super::*;
    use crate::config::{AppendPolicy, OpsOptions};
    use crate::diagnostics::CollectingSink;

    /// Yields some bytes, then fails.
    struct BrokenReader {
        sent: bool,
    }

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::other("connection reset"));
            }
            self.sent = true;
            buf[..4].copy_from_slice(b"part");
            Ok(4)
        }
    }

    #[test]
    fn test_write_text_then_append() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("greeting.txt");
        let ops = FileOps::new();

        assert!(ops.write_text(&path, "hello", false));
        assert!(ops.write_text(&path, "world", true));
        assert_eq!(fs::read_to_string(&path).unwrap(), "helloworld");

        assert!(ops.write_text(&path, "reset", false));
        assert_eq!(fs::read_to_string(&path).unwrap(), "reset");
    }

    #[test]
    fn test_write_text_truncate_policy_ignores_append() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("t.txt");
        let ops = FileOps::new().with_options(OpsOptions {
            text_append: AppendPolicy::AlwaysTruncate,
            ..OpsOptions::default()
        });

        assert!(ops.write_text(&path, "hello", false));
        assert!(ops.write_text(&path, "world", true));
        assert_eq!(fs::read_to_string(&path).unwrap(), "world");
    }

    #[test]
    fn test_write_text_missing_parent_fails() {
        let tmp = TempDir::new().unwrap();
        let ops = FileOps::with_sink(CollectingSink::new());

        assert!(!ops.write_text(&tmp.path().join("no/dir/x.txt"), "x", false));
        assert_eq!(ops.sink().len(), 1);
    }

    #[test]
    fn test_write_bytes_honors_append_by_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("b.bin");
        let ops = FileOps::new();

        assert!(ops.write_bytes(&path, &b"abc"[..], false));
        assert!(ops.write_bytes(&path, &b"def"[..], true));
        assert_eq!(fs::read(&path).unwrap(), b"abcdef");

        assert!(ops.write_bytes(&path, &b"x"[..], false));
        assert_eq!(fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_write_bytes_truncate_policy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("b.bin");
        let ops = FileOps::new().with_options(OpsOptions {
            bytes_append: AppendPolicy::AlwaysTruncate,
            ..OpsOptions::default()
        });

        assert!(ops.write_bytes(&path, &b"abc"[..], false));
        assert!(ops.write_bytes(&path, &b"def"[..], true));
        assert_eq!(fs::read(&path).unwrap(), b"def");
    }

    #[test]
    fn test_write_bytes_failing_reader_keeps_partial_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("partial.bin");

        let err = FileOps::new()
            .try_write_bytes(&path, BrokenReader { sent: false }, false)
            .unwrap_err();

        assert!(matches!(
            err,
            FileOpsError::Io {
                step: Step::Read,
                ..
            }
        ));
        assert!(err.to_string().contains(STREAM_LABEL));
        // Buffered bytes were flushed when the writer was released.
        assert_eq!(fs::read(&path).unwrap(), b"part");
    }

    #[test]
    fn test_write_bytes_into_directory_fails() {
        let tmp = TempDir::new().unwrap();

        assert!(!FileOps::new().write_bytes(tmp.path(), &b"x"[..], false));
    }
}
