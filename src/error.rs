//! Error types for file operations.
//!
//! Every fallible operation in [`crate::ops`] has a `try_*` variant returning
//! [`FileOpsError`]. The plain variants collapse these into a boolean (or a
//! byte count for sizing) after handing the error to the configured
//! [`crate::diagnostics::DiagnosticSink`].

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, FileOpsError>;

/// The step of an operation that an I/O error happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Opening a file for reading.
    OpenRead,
    /// Opening a file for writing.
    OpenWrite,
    /// Reading from a source.
    Read,
    /// Writing to a destination.
    Write,
    /// Flushing buffered output.
    Flush,
    /// Querying metadata.
    Metadata,
    /// Deleting a file or an empty directory.
    Delete,
    /// Releasing a resource.
    Release,
}

impl Step {
    const fn as_str(self) -> &'static str {
        match self {
            Self::OpenRead => "open for reading",
            Self::OpenWrite => "open for writing",
            Self::Read => "read",
            Self::Write => "write",
            Self::Flush => "flush",
            Self::Metadata => "read metadata of",
            Self::Delete => "delete",
            Self::Release => "release",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the file-system helpers.
#[derive(Error, Debug)]
pub enum FileOpsError {
    /// The path was empty.
    #[error("invalid path: path is empty")]
    InvalidPath,

    /// Nothing exists at the path.
    #[error("`{}` does not exist", .0.display())]
    NotFound(PathBuf),

    /// An empty file could not be created.
    #[error("failed to create `{}`: {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory listing could not be obtained.
    #[error("failed to list directory `{}`: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O error during a specific step.
    #[error("failed to {step} `{}`: {source}", path.display())]
    Io {
        step: Step,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path is neither a regular file nor a directory.
    #[error("`{}` is not a regular file or directory", .0.display())]
    Unsupported(PathBuf),

    /// The root of a recursive delete could not be removed.
    #[error(
        "failed to remove `{}` ({failed} nested entries could not be removed): {source}",
        path.display()
    )]
    RemoveFailed {
        path: PathBuf,
        failed: usize,
        #[source]
        source: io::Error,
    },
}

impl FileOpsError {
    pub(crate) fn io(step: Step, path: &Path, source: io::Error) -> Self {
        Self::Io {
            step,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error means "there was nothing at the path".
    ///
    /// `remove` reports an absent path as a failure; callers that only want
    /// to know whether something went wrong can use this to tell the cases apart.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidPath => None,
            Self::NotFound(path)
            | Self::Unsupported(path)
            | Self::CreateFailed { path, .. }
            | Self::ReadDir { path, .. }
            | Self::Io { path, .. }
            | Self::RemoveFailed { path, .. } => Some(path),
        }
    }
}
