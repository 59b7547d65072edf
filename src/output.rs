//! Structured results for the command-line front end.
//!
//! Every subcommand produces a [`Report`]: one [`Entry`] per path it worked
//! on plus a [`Summary`]. With `--json` the report is serialized to stdout as
//! a single JSON object; otherwise it is printed as colored text.

use std::path::Path;

use colored::Colorize;
use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::error::FileOpsError;
use crate::ops::RemoveReport;

/// The operation a report describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `fileops size`
    Size,
    /// `fileops copy`
    Copy,
    /// `fileops remove`
    Remove,
    /// `fileops touch`
    Touch,
    /// `fileops write`
    Write,
    /// `fileops mime`
    Mime,
}

/// Top-level output of one subcommand.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Which operation ran.
    pub command: Command,

    /// One entry per path.
    pub entries: Vec<Entry>,

    /// Aggregated counts.
    pub summary: Summary,
}

/// Result for a single path.
#[derive(Debug, Default, Serialize)]
pub struct Entry {
    /// The path operated on (the destination for `copy`).
    pub path: String,

    /// Whether the operation succeeded.
    pub success: bool,

    /// Source path, for `copy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Bytes measured, copied or written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    /// Human-readable form of `bytes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_formatted: Option<String>,

    /// Deleted entries, for `remove`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<RemoveReport>,

    /// MIME type, for `mime`. `null` when the extension is unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<Option<&'static str>>,

    /// Error message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated counts across all entries.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// Number of entries.
    pub total: usize,

    /// Entries that succeeded.
    pub succeeded: usize,

    /// Entries that failed.
    pub failed: usize,

    /// Sum of `bytes` over successful entries.
    pub total_bytes: u64,

    /// Human-readable form of `total_bytes`.
    pub total_bytes_formatted: String,
}

impl Entry {
    /// A successful entry with nothing else to say.
    #[must_use]
    pub fn done(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            success: true,
            ..Self::default()
        }
    }

    /// A successful entry carrying a byte count.
    #[must_use]
    pub fn bytes(path: &Path, bytes: u64) -> Self {
        Self {
            bytes: Some(bytes),
            bytes_formatted: Some(format_size(bytes, DECIMAL)),
            ..Self::done(path)
        }
    }

    /// A successful copy from `source`.
    #[must_use]
    pub fn copied(source: &Path, destination: &Path, bytes: u64) -> Self {
        Self {
            source: Some(source.display().to_string()),
            ..Self::bytes(destination, bytes)
        }
    }

    /// A successful recursive delete.
    #[must_use]
    pub fn removed(path: &Path, report: RemoveReport) -> Self {
        Self {
            removed: Some(report),
            ..Self::done(path)
        }
    }

    /// A MIME lookup, which always succeeds.
    #[must_use]
    pub fn mime(path: &Path, mime_type: Option<&'static str>) -> Self {
        Self {
            mime_type: Some(mime_type),
            ..Self::done(path)
        }
    }

    /// A failed entry.
    #[must_use]
    pub fn failed(path: &Path, error: &FileOpsError) -> Self {
        Self {
            path: path.display().to_string(),
            success: false,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

impl Report {
    /// Build a report and its summary from `entries`.
    #[must_use]
    pub fn new(command: Command, entries: Vec<Entry>) -> Self {
        let succeeded = entries.iter().filter(|e| e.success).count();
        let total_bytes: u64 = entries
            .iter()
            .filter(|e| e.success)
            .filter_map(|e| e.bytes)
            .sum();

        let summary = Summary {
            total: entries.len(),
            succeeded,
            failed: entries.len() - succeeded,
            total_bytes,
            total_bytes_formatted: format_size(total_bytes, DECIMAL),
        };

        Self {
            command,
            entries,
            summary,
        }
    }

    /// Whether every entry succeeded.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.summary.failed == 0
    }

    /// Print the report as human-readable colored text.
    pub fn print_human(&self) {
        for entry in &self.entries {
            if entry.success {
                println!("{}", self.describe_success(entry));
            } else {
                eprintln!(
                    "  {} {}",
                    "❌".red(),
                    entry.error.as_deref().unwrap_or("failed").red()
                );
            }
        }

        if self.command == Command::Size && self.entries.len() > 1 {
            println!(
                "\n{} {}",
                "📊 Total:".bold(),
                self.summary.total_bytes_formatted.bright_green().bold()
            );
        }

        if self.summary.failed > 0 {
            println!(
                "\n{}",
                format!(
                    "⚠️  {} of {} operations failed",
                    self.summary.failed, self.summary.total
                )
                .yellow()
            );
        }
    }

    fn describe_success(&self, entry: &Entry) -> String {
        let size = entry.bytes_formatted.as_deref().unwrap_or("0 B");

        match self.command {
            Command::Size => format!("  {:>10}  {}", size.bright_white(), entry.path),
            Command::Copy => format!(
                "  {} Copied {} → {} ({})",
                "✅".green(),
                entry.source.as_deref().unwrap_or("?"),
                entry.path,
                size
            ),
            Command::Remove => {
                let removed = entry.removed.map_or(0, |r| r.removed);
                format!(
                    "  {} Removed {} ({removed} entries)",
                    "🗑️ ".green(),
                    entry.path
                )
            }
            Command::Touch => format!("  {} {}", "✅".green(), entry.path),
            Command::Write => format!("  {} Wrote {} to {}", "✍️ ".green(), size, entry.path),
            Command::Mime => format!(
                "  {}: {}",
                entry.path,
                entry
                    .mime_type
                    .flatten()
                    .map_or_else(|| "(unknown)".dimmed().to_string(), |m| m.cyan().to_string())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_summary_counts_successes_and_bytes() {
        let report = Report::new(
            Command::Size,
            vec![
                Entry::bytes(Path::new("a"), 1_000),
                Entry::bytes(Path::new("b"), 500),
                Entry::failed(Path::new("c"), &FileOpsError::InvalidPath),
            ],
        );

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.succeeded, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.total_bytes, 1_500);
        assert!(report.summary.total_bytes_formatted.starts_with("1.5"));
        assert!(report.summary.total_bytes_formatted.ends_with("kB"));
        assert!(!report.all_succeeded());
    }

    #[test]
    fn test_json_shape() {
        let report = Report::new(
            Command::Copy,
            vec![Entry::copied(Path::new("src"), Path::new("dst"), 4)],
        );

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["command"], "copy");
        assert_eq!(json["entries"][0]["path"], "dst");
        assert_eq!(json["entries"][0]["source"], "src");
        assert_eq!(json["entries"][0]["bytes"], 4);
        assert!(json["entries"][0].get("error").is_none());
        assert!(json["entries"][0].get("mime_type").is_none());
        assert_eq!(json["summary"]["succeeded"], 1);
    }

    #[test]
    fn test_json_unknown_mime_is_null() {
        let report = Report::new(
            Command::Mime,
            vec![
                Entry::mime(Path::new("a.png"), Some("image/png")),
                Entry::mime(Path::new("README"), None),
            ],
        );

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["entries"][0]["mime_type"], "image/png");
        assert!(json["entries"][1]["mime_type"].is_null());
        assert!(report.all_succeeded());
    }

    #[test]
    fn test_failed_entry_carries_message() {
        let entry = Entry::failed(
            Path::new("x"),
            &FileOpsError::NotFound(PathBuf::from("x")),
        );

        assert!(!entry.success);
        assert!(entry.error.unwrap().contains("does not exist"));
    }

    #[test]
    fn test_removed_entry() {
        let entry = Entry::removed(
            Path::new("dir"),
            RemoveReport {
                removed: 3,
                failed: 0,
            },
        );

        assert!(entry.success);
        assert_eq!(entry.removed.unwrap().removed, 3);
        assert!(entry.bytes.is_none());
    }
}
