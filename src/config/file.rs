//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/fileops/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! [remove]
//! strict = false
//!
//! [copy]
//! allow_absent_target = true
//!
//! [write]
//! bytes_append = "honor"     # or "truncate"
//! text_append = "honor"
//!
//! [logging]
//! verbose = false
//! ```

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

use super::options::{AppendPolicy, CopyTarget, OpsOptions, RemoveMode};

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Recursive delete options
    #[serde(default)]
    pub remove: FileRemoveConfig,

    /// Copy options
    #[serde(default)]
    pub copy: FileCopyConfig,

    /// Writer options
    #[serde(default)]
    pub write: FileWriteConfig,

    /// Logging options
    #[serde(default)]
    pub logging: FileLoggingConfig,
}

/// Recursive delete options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileRemoveConfig {
    /// Abort on the first entry that cannot be removed
    pub strict: Option<bool>,
}

/// Copy options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileCopyConfig {
    /// Allow copying onto a destination that does not exist yet
    pub allow_absent_target: Option<bool>,
}

/// Writer options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileWriteConfig {
    /// Append policy of the byte-stream writer (`"honor"` or `"truncate"`)
    pub bytes_append: Option<String>,

    /// Append policy of the text writer (`"honor"` or `"truncate"`)
    pub text_append: Option<String>,
}

/// Logging options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    /// Log nested failures and debug details
    pub verbose: Option<bool>,
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/fileops/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fileops").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    /// If the file exists but is malformed, returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or unexpected fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }

    /// Operation options described by this file, with defaults for unset keys.
    ///
    /// Unrecognised append policy names fall back to the default policy.
    #[must_use]
    pub fn ops_options(&self) -> OpsOptions {
        OpsOptions {
            remove_mode: if self.remove.strict.unwrap_or(false) {
                RemoveMode::Strict
            } else {
                RemoveMode::Lenient
            },
            copy_target: if self.copy.allow_absent_target.unwrap_or(false) {
                CopyTarget::AllowAbsent
            } else {
                CopyTarget::RequireExisting
            },
            bytes_append: parse_policy(self.write.bytes_append.as_deref()),
            text_append: parse_policy(self.write.text_append.as_deref()),
        }
    }
}

fn parse_policy(value: Option<&str>) -> AppendPolicy {
    value
        .and_then(|s| AppendPolicy::from_str(s, true).ok())
        .unwrap_or_default()
}
