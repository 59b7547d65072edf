//! Command-line interface definition and argument parsing.
//!
//! This module defines all subcommands, options, and their validation using
//! the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fileops::config::{AppendPolicy, CopyTarget, FileConfig, OpsOptions, RemoveMode};

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the size of files or directory trees
    ///
    /// Entries that cannot be read count as zero (and are logged) unless
    /// --strict is given.
    Size {
        /// Files or directories to measure
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Fail a path at the first entry that cannot be read
        #[arg(long)]
        strict: bool,
    },

    /// Copy a file, replacing the destination
    ///
    /// The destination is deleted first (file or whole directory tree) and
    /// recreated. Unless --allow-absent is given, a destination that does not
    /// exist yet makes the copy fail.
    Copy {
        /// File to copy
        src: PathBuf,

        /// Destination to replace
        dst: PathBuf,

        /// Create the destination when it does not exist yet
        #[arg(long)]
        allow_absent: bool,
    },

    /// Delete files or directory trees
    ///
    /// Entries that cannot be deleted are skipped (and logged) unless --strict
    /// is given. Deleting a path that does not exist counts as a failure.
    Remove {
        /// Files or directories to delete
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Stop at the first entry that cannot be deleted
        #[arg(long)]
        strict: bool,
    },

    /// Make sure regular files exist, creating empty ones where missing
    Touch {
        /// Files to create
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Write text, or bytes from stdin, into a file
    Write {
        /// Destination file
        path: PathBuf,

        /// Text to write; stdin is copied when omitted
        #[arg(short = 't', long)]
        text: Option<String>,

        /// Append instead of truncating
        #[arg(short = 'a', long)]
        append: bool,

        /// How the append flag is interpreted (honor, truncate)
        #[arg(long, value_enum)]
        append_policy: Option<AppendPolicy>,
    },

    /// Look up MIME types by file extension
    Mime {
        /// Paths whose extension to look up
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser)]
#[command(name = "fileops")]
#[command(about = "Size, copy, delete and write files, and look up MIME types")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output results as a single JSON object for scripting/piping
    #[arg(long, global = true)]
    json: bool,

    /// Log nested failures and debug details to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Whether verbose logging is enabled.
    ///
    /// The CLI flag (if set) takes priority, then the config file value, then `false`.
    #[must_use]
    pub fn verbose(&self, config: &FileConfig) -> bool {
        self.verbose || config.logging.verbose.unwrap_or(false)
    }

    /// Resolve the operation options from CLI args and config file.
    ///
    /// Flags of the running subcommand override the config file, which
    /// overrides the defaults. `write --append-policy` applies to whichever
    /// writer the command uses.
    #[must_use]
    pub fn ops_options(&self, config: &FileConfig) -> OpsOptions {
        let mut options = config.ops_options();

        match &self.command {
            Commands::Copy {
                allow_absent: true, ..
            } => options.copy_target = CopyTarget::AllowAbsent,
            Commands::Remove { strict: true, .. } => options.remove_mode = RemoveMode::Strict,
            Commands::Write {
                append_policy: Some(policy),
                ..
            } => {
                options.bytes_append = *policy;
                options.text_append = *policy;
            }
            _ => {}
        }

        options
    }
}
