//! Releasing I/O resources on every exit path.
//!
//! Read handles close themselves on drop. Writers can hold buffered bytes that
//! only reach the disk when flushed, and a failed flush on drop is silently
//! lost, so the transfer code routes its writers through [`release_all`] once
//! it is done with them, whether it succeeded or not.

use std::io::{self, Write};
use std::path::Path;

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::error::{FileOpsError, Step};

/// Something that has to be explicitly released before it is dropped.
pub trait Release {
    /// Release the resource. Calling this more than once is harmless.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the release failed.
    fn release(&mut self) -> io::Result<()>;
}

impl<W: Write + ?Sized> Release for W {
    fn release(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Release every present resource in order.
///
/// `None` entries are skipped. A failing release is reported to `sink` as a
/// warning (attributed to `path`) and the remaining resources are still
/// released. Returns the number of releases that failed.
pub fn release_all<'a, I>(resources: I, path: &Path, sink: &dyn DiagnosticSink) -> usize
where
    I: IntoIterator<Item = Option<&'a mut dyn Release>>,
{
    let mut failures = 0;

    for resource in resources.into_iter().flatten() {
        if let Err(e) = resource.release() {
            failures += 1;
            sink.report(
                Severity::Warning,
                &FileOpsError::io(Step::Release, path, e),
            );
        }
    }

    failures
}
