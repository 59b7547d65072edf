//! Configuration for file operations.
//!
//! [`options`] holds the behaviour switches the library works with;
//! [`file`] loads them (plus logging settings) from the TOML config file.

pub mod file;
pub mod options;

pub use file::FileConfig;
pub use options::{AppendPolicy, CopyTarget, OpsOptions, RemoveMode};
