//! Diagnostic sinks.
//!
//! The file helpers never print anything themselves. When an operation fails,
//! or when a lenient operation swallows a nested failure, the error is handed
//! to a [`DiagnosticSink`]. The default sink discards everything; [`LogSink`]
//! forwards to the `log` facade so the binary (or any host application) decides
//! where the messages end up.

use std::sync::Mutex;

use crate::error::FileOpsError;

/// How serious a reported failure is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// The operation as a whole failed.
    Error,
    /// A nested step failed but the operation carried on.
    Warning,
}

/// Receives failures from file operations.
pub trait DiagnosticSink {
    /// Report a failure.
    fn report(&self, severity: Severity, error: &FileOpsError);
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _severity: Severity, _error: &FileOpsError) {}
}

/// Forwards reports to the `log` facade under the `fileops` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, severity: Severity, error: &FileOpsError) {
        match severity {
            Severity::Error => log::error!(target: "fileops", "{error}"),
            Severity::Warning => log::warn!(target: "fileops", "{error}"),
        }
    }
}

/// Keeps every report in memory as `(severity, message)` pairs.
///
/// Handy for collecting the failures of a lenient operation and showing them
/// afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<(Severity, String)>>,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all reports collected so far, leaving the sink empty.
    #[must_use]
    pub fn take(&self) -> Vec<(Severity, String)> {
        self.reports
            .lock()
            .map(|mut reports| std::mem::take(&mut *reports))
            .unwrap_or_default()
    }

    /// Number of reports collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.lock().map_or(0, |reports| reports.len())
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, severity: Severity, error: &FileOpsError) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push((severity, error.to_string()));
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, severity: Severity, error: &FileOpsError) {
        (**self).report(severity, error);
    }
}
