//! The file-system helper component.
//!
//! [`FileOps`] bundles the operations together with the [`OpsOptions`] that
//! settle their ambiguous corners and the [`DiagnosticSink`] that receives
//! their failures. Every operation comes in two flavours:
//!
//! - a plain one (`ensure_exists`, `size`, `copy`, `remove`, `write_bytes`,
//!   `write_text`) that reports failures to the sink and returns a `bool`
//!   (or a byte count for `size`);
//! - a `try_*` one that returns the [`FileOpsError`] instead.
//!
//! Operations are synchronous and hold no state between calls; paths are
//! classified afresh every time, so concurrent changes by other processes may
//! make an operation fail or see a partial tree.

mod copy;
mod exists;
mod remove;
mod size;
mod write;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

pub use remove::RemoveReport;

use crate::config::OpsOptions;
use crate::diagnostics::{DiagnosticSink, NoopSink, Severity};
use crate::error::{FileOpsError, Result, Step};
use crate::release::{Release, release_all};
use crate::transfer::{BUFFER_SIZE, TransferError, pump};

/// Label used in errors for reads from a caller-supplied stream.
const STREAM_LABEL: &str = "<input stream>";

/// File-system helpers sharing one set of options and one diagnostic sink.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use fileops::ops::FileOps;
///
/// let ops = FileOps::new();
/// if ops.write_text(Path::new("notes.txt"), "hello", false) {
///     ops.copy(Path::new("notes.txt"), Path::new("notes.bak"));
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct FileOps<S: DiagnosticSink = NoopSink> {
    options: OpsOptions,
    sink: S,
}

impl FileOps {
    /// Create helpers with default options that discard diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DiagnosticSink> FileOps<S> {
    /// Create helpers with default options reporting to `sink`.
    #[must_use]
    pub fn with_sink(sink: S) -> Self {
        Self {
            options: OpsOptions::default(),
            sink,
        }
    }

    /// Replace the options.
    #[must_use]
    pub const fn with_options(mut self, options: OpsOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in effect.
    #[must_use]
    pub const fn options(&self) -> &OpsOptions {
        &self.options
    }

    /// The diagnostic sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Turn a result into its plain view, reporting the error if there is one.
    ///
    /// "Not found" is reported as a warning: for `remove` it is the normal
    /// answer for an absent path.
    fn settle<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let severity = if e.is_not_found() {
                    Severity::Warning
                } else {
                    Severity::Error
                };
                self.sink.report(severity, &e);
                None
            }
        }
    }

    /// Copy `reader` into `writer` with the fixed buffer, flush, and release
    /// the writer whatever happened.
    fn transfer<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        mut writer: BufWriter<File>,
        source: &Path,
        destination: &Path,
    ) -> Result<u64> {
        let outcome = pump(reader, &mut writer)
            .map_err(|e| match e {
                TransferError::Read(e) => FileOpsError::io(Step::Read, source, e),
                TransferError::Write(e) => FileOpsError::io(Step::Write, destination, e),
            })
            .and_then(|copied| {
                writer
                    .flush()
                    .map(|()| copied)
                    .map_err(|e| FileOpsError::io(Step::Flush, destination, e))
            });

        release_all(
            [Some(&mut writer as &mut dyn Release)],
            destination,
            &self.sink,
        );

        outcome
    }
}

/// Reject empty paths before touching the file system.
fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(FileOpsError::InvalidPath);
    }
    Ok(())
}

/// Open `path` for writing, appending or truncating, creating it if needed.
fn open_for_write(path: &Path, append: bool) -> Result<BufWriter<File>> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    options
        .open(path)
        .map(|file| BufWriter::with_capacity(BUFFER_SIZE, file))
        .map_err(|e| FileOpsError::io(Step::OpenWrite, path, e))
}
