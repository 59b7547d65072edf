//! Classification of file-system entries.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

/// What a path resolves to at the moment it is queried.
///
/// Classification never follows symbolic links: a link is [`FileNode::Other`]
/// whatever it points at. Nothing is cached, so a path may change kind between
/// two calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNode {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Nothing exists at the path.
    Absent,
    /// A symbolic link, socket, device or other special entry.
    Other,
}

impl FileNode {
    /// Classify the entry at `path`.
    ///
    /// Any error while reading metadata (not found, permission denied on a
    /// parent, ...) yields [`FileNode::Absent`], since nothing usable exists
    /// there from the caller's point of view.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        Self::try_of(path).unwrap_or(Self::Absent)
    }

    /// Classify the entry at `path`, distinguishing "not found" from other
    /// metadata errors.
    ///
    /// # Errors
    ///
    /// Returns the metadata error unless it is [`io::ErrorKind::NotFound`].
    pub fn try_of(path: &Path) -> io::Result<Self> {
        match fs::symlink_metadata(path) {
            Ok(metadata) => Ok(Self::from_file_type(metadata.file_type())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::Absent),
            Err(e) => Err(e),
        }
    }

    pub(crate) fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            Self::File
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::Other
        }
    }

    /// Whether anything exists at the path.
    #[must_use]
    pub const fn exists(self) -> bool {
        !matches!(self, Self::Absent)
    }
}
