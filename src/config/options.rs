//! Behaviour switches for file operations.
//!
//! This module defines the options that change how [`crate::ops::FileOps`]
//! treats the ambiguous corners of its contract: nested delete failures, copy
//! onto an absent destination, and the meaning of the writers' append flag.

use clap::ValueEnum;

/// How a recursive delete reacts to an entry that cannot be removed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum RemoveMode {
    /// Keep deleting siblings and report the failures; the result is the
    /// outcome of removing the root
    #[default]
    Lenient,

    /// Stop at the first entry that cannot be removed and return its error
    Strict,
}

/// What a copy does when the destination does not exist yet.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum CopyTarget {
    /// Clearing an absent destination counts as a failed delete, so the copy
    /// fails
    #[default]
    RequireExisting,

    /// An absent destination is simply created
    AllowAbsent,
}

/// How a writer interprets its `append` argument.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum AppendPolicy {
    /// `append = true` appends, `append = false` truncates
    #[default]
    #[value(name = "honor")]
    HonorFlag,

    /// Always truncate, ignoring the flag
    #[value(name = "truncate")]
    AlwaysTruncate,
}

impl AppendPolicy {
    /// Whether a writer called with `append` should open in append mode.
    #[must_use]
    pub const fn appends(self, append: bool) -> bool {
        match self {
            Self::HonorFlag => append,
            Self::AlwaysTruncate => false,
        }
    }
}

/// The full set of behaviour switches for a [`crate::ops::FileOps`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpsOptions {
    /// Reaction to nested delete failures
    pub remove_mode: RemoveMode,

    /// Copy behaviour for an absent destination
    pub copy_target: CopyTarget,

    /// Append handling of `write_bytes`
    pub bytes_append: AppendPolicy,

    /// Append handling of `write_text`
    pub text_append: AppendPolicy,
}
