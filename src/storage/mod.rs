//! # Configuration storage
//!
//! The engine itself never touches the filesystem; this layer only serves
//! the command-line front end.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Global config | TOML | `~/.config/taskdraft/config.toml` |
//! | Project config | TOML | `.taskdraft.toml` in the working directory or an ancestor |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration

mod config;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_CONFIG_FILE};
