//! # fileops
//!
//! Small file-system helpers with a forgiving, boolean-first contract:
//!
//! - [`FileOps::ensure_exists`]: make sure a regular file exists
//! - [`FileOps::size`]: size of a file or a whole directory tree
//! - [`FileOps::remove`]: recursive delete that keeps going past stubborn entries
//! - [`FileOps::copy`]: replace a destination with a buffered copy of a file
//! - [`FileOps::write_bytes`] / [`FileOps::write_text`]: write a stream or a string
//!
//! Each operation also has a `try_*` form returning a [`FileOpsError`], and
//! failures of the plain forms go to a pluggable [`DiagnosticSink`] instead of
//! being printed.
//!
//! Alongside the core sit a few unrelated helpers: MIME lookup by extension
//! ([`mime`]), default-on-failure number parsing ([`parse`]) and an emptiness
//! check for strings ([`text`]).

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod mime;
pub mod node;
pub mod ops;
pub mod output;
pub mod parse;
pub mod release;
pub mod text;
pub mod transfer;

pub use config::{AppendPolicy, CopyTarget, FileConfig, OpsOptions, RemoveMode};
pub use diagnostics::{CollectingSink, DiagnosticSink, LogSink, NoopSink, Severity};
pub use error::{FileOpsError, Result};
pub use node::FileNode;
pub use ops::{FileOps, RemoveReport};
pub use transfer::BUFFER_SIZE;
