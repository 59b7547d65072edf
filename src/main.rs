//! # fileops
//!
//! Command-line front end for the `fileops` file-system helpers.
//!
//! ## Usage
//!
//! ```bash
//! # How big is this tree?
//! fileops size ~/Downloads
//!
//! # Replace a file with a copy of another
//! fileops copy notes.txt backup/notes.txt --allow-absent
//!
//! # Delete a tree, stopping at the first entry that resists
//! fileops remove build/ --strict
//!
//! # Append a line, or pipe bytes in
//! fileops write log.txt --text "done" --append
//! curl -s https://example.com | fileops write page.html
//! ```

mod cli;

use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use fileops::{
    FileOps, LogSink,
    config::FileConfig,
    mime::mime_type_for_path,
    output::{Command, Entry, Report},
};

/// Entry point for the fileops application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code. Operations that
/// ran but failed also end with status 1.
fn main() {
    match inner_main() {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    }
}

/// Main application logic that can return errors.
///
/// Returns whether every requested operation succeeded.
///
/// # Errors
///
/// Returns errors from the config subcommand or from JSON serialization.
fn inner_main() -> Result<bool> {
    let args = Cli::parse();

    if let Commands::Config { command } = &args.command {
        handle_config_command(command)?;
        return Ok(true);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);
    init_logging(args.verbose(&file_config));

    let ops = FileOps::with_sink(LogSink).with_options(args.ops_options(&file_config));
    let report = run_command(&ops, &args.command);

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_human();
    }

    Ok(report.all_succeeded())
}

/// Initialise `env_logger`; `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Run one file subcommand and collect its results.
fn run_command(ops: &FileOps<LogSink>, command: &Commands) -> Report {
    match command {
        Commands::Size { paths, strict } => Report::new(
            Command::Size,
            each(paths, |path| {
                if *strict {
                    ops.try_size(path).map_or_else(
                        |e| Entry::failed(path, &e),
                        |bytes| Entry::bytes(path, bytes),
                    )
                } else {
                    Entry::bytes(path, ops.size(path))
                }
            }),
        ),
        Commands::Copy { src, dst, .. } => {
            let entry = ops.try_copy(src, dst).map_or_else(
                |e| Entry::failed(dst, &e),
                |bytes| Entry::copied(src, dst, bytes),
            );
            Report::new(Command::Copy, vec![entry])
        }
        Commands::Remove { paths, .. } => Report::new(
            Command::Remove,
            each(paths, |path| {
                ops.try_remove(path).map_or_else(
                    |e| Entry::failed(path, &e),
                    |report| Entry::removed(path, report),
                )
            }),
        ),
        Commands::Touch { paths } => Report::new(
            Command::Touch,
            each(paths, |path| {
                ops.try_ensure_exists(path)
                    .map_or_else(|e| Entry::failed(path, &e), |()| Entry::done(path))
            }),
        ),
        Commands::Write {
            path, text, append, ..
        } => {
            let result = match text {
                Some(text) => ops
                    .try_write_text(path, text, *append)
                    .map(|()| text.len() as u64),
                None => ops.try_write_bytes(path, std::io::stdin().lock(), *append),
            };
            let entry =
                result.map_or_else(|e| Entry::failed(path, &e), |bytes| Entry::bytes(path, bytes));
            Report::new(Command::Write, vec![entry])
        }
        Commands::Mime { paths } => Report::new(
            Command::Mime,
            each(paths, |path| Entry::mime(path, mime_type_for_path(path))),
        ),
        Commands::Config { .. } => unreachable!("config is handled before any file operation"),
    }
}

fn each(paths: &[PathBuf], op: impl Fn(&Path) -> Entry) -> Vec<Entry> {
    paths.iter().map(|path| op(path)).collect()
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# fileops configuration
# All values shown are their defaults. Uncomment and change as needed.

[remove]
# Stop a recursive delete at the first entry that cannot be removed
# strict = false

[copy]
# Create the destination of a copy when it does not exist yet
# (by default copying onto a missing path fails)
# allow_absent_target = false

[write]
# How the append flag of the byte-stream writer is interpreted: "honor" or "truncate"
# bytes_append = "honor"

# How the append flag of the text writer is interpreted: "honor" or "truncate"
# text_append = "honor"

[logging]
# Log nested failures and debug details to stderr
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    format!(
        "\
[remove]
strict              = {strict}

[copy]
allow_absent_target = {allow_absent_target}

[write]
bytes_append        = {bytes_append}
text_append         = {text_append}

[logging]
verbose             = {verbose}",
        strict = show_bool(config.remove.strict, false),
        allow_absent_target = show_bool(config.copy.allow_absent_target, false),
        bytes_append = show_str(config.write.bytes_append.as_deref(), "honor"),
        text_append = show_str(config.write.text_append.as_deref(), "honor"),
        verbose = show_bool(config.logging.verbose, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.ops_options(), fileops::config::OpsOptions::default());
    }

    #[test]
    fn test_format_config_marks_defaults() {
        let formatted = format_config(&FileConfig::default());
        assert!(formatted.contains("strict              = false  (default)"));
        assert!(formatted.contains("bytes_append        = \"honor\"  (default)"));
    }

    #[test]
    fn test_run_size_is_lenient_unless_strict() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("data.bin");
        std::fs::write(&file, [0u8; 42]).unwrap();
        let ops = FileOps::with_sink(LogSink);
        let paths = vec![file, PathBuf::new()];

        let lenient = run_command(
            &ops,
            &Commands::Size {
                paths: paths.clone(),
                strict: false,
            },
        );
        assert!(lenient.all_succeeded());
        assert_eq!(lenient.summary.total_bytes, 42);
        assert_eq!(lenient.entries[1].bytes, Some(0));

        let strict = run_command(
            &ops,
            &Commands::Size {
                paths,
                strict: true,
            },
        );
        assert!(!strict.all_succeeded());
        assert_eq!(strict.summary.failed, 1);
        assert_eq!(strict.entries[0].bytes, Some(42));
    }

    #[test]
    fn test_run_mime_command() {
        let ops = FileOps::with_sink(LogSink);
        let report = run_command(
            &ops,
            &Commands::Mime {
                paths: vec![PathBuf::from("a.png"), PathBuf::from("b")],
            },
        );

        assert!(report.all_succeeded());
        assert_eq!(report.entries[0].mime_type, Some(Some("image/png")));
        assert_eq!(report.entries[1].mime_type, Some(None));
    }
}
