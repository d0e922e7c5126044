//! Configuration handling for taskdraft
//!
//! Configuration is read from `.taskdraft.toml` (project, found by walking
//! up from the working directory) and `~/.config/taskdraft/config.toml`
//! (global). Missing files mean defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ContentCategory;

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = ".taskdraft.toml";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Declared type used when a file extension is not recognized
    pub default_type: String,

    /// Extra file extension -> declared type mappings
    pub extensions: BTreeMap<String, String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            default_type: "text/markdown".to_string(),
            extensions: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Resolves the declared type for a file extension
    ///
    /// Project mappings win over the built-in extension names; anything
    /// unknown falls back to `default_type`.
    pub fn declared_type_for(&self, extension: Option<&str>) -> String {
        let Some(ext) = extension.map(|e| e.trim_start_matches('.').to_lowercase()) else {
            return self.default_type.clone();
        };

        if let Some(mapped) = self.extensions.get(&ext) {
            return mapped.clone();
        }

        match ContentCategory::from_declared(&ext) {
            ContentCategory::Unsupported => self.default_type.clone(),
            _ => ext,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_type.trim().is_empty() {
            return Err(ConfigError::Invalid("default_type must not be empty".to_string()));
        }
        if let Some((ext, _)) = self.extensions.iter().find(|(k, v)| k.trim().is_empty() || v.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("empty extension mapping: {:?}", ext)));
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Log level used when neither RUST_LOG nor --verbose is set
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

impl GlobalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log_level.trim().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        Ok(())
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let start = std::env::current_dir().context("Failed to read current directory")?;
        let project_root = Self::find_project_root_from(&start);

        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskdraft", "taskdraft").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        Self::parse_global(&content).context("Failed to parse global config")
    }

    fn parse_global(content: &str) -> Result<GlobalConfig, ConfigError> {
        let config: GlobalConfig = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads project configuration from a specific root
    pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        Self::parse_project(&content)
            .with_context(|| format!("Failed to parse project config: {}", config_path.display()))
    }

    fn parse_project(content: &str) -> Result<ProjectConfig, ConfigError> {
        let config: ProjectConfig = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Finds the nearest directory at or above `start` holding `.taskdraft.toml`
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if a project config file was found
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.project.default_type, "text/markdown");
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert_eq!(config.global.log_level, "warn");
        assert!(!config.is_in_project());
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
default_type = "text/plain"

[extensions]
mdx = "text/markdown"
jsonl = "application/json"
"#;

        let config = Config::parse_project(toml).unwrap();
        assert_eq!(config.default_type, "text/plain");
        assert_eq!(config.extensions.get("mdx").map(String::as_str), Some("text/markdown"));
    }

    #[test]
    fn parse_global_config() {
        let toml = r#"
default_format = "json"
log_level = "debug"
"#;

        let config = Config::parse_global(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn invalid_log_level() {
        let err = Config::parse_global("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml() {
        let err = Config::parse_project("default_type = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn declared_type_resolution() {
        let mut config = ProjectConfig::default();
        config.extensions.insert("notes".to_string(), "text/plain".to_string());

        assert_eq!(config.declared_type_for(Some("md")), "md");
        assert_eq!(config.declared_type_for(Some("JSON")), "json");
        assert_eq!(config.declared_type_for(Some("notes")), "text/plain");
        assert_eq!(config.declared_type_for(Some("xyz")), "text/markdown");
        assert_eq!(config.declared_type_for(None), "text/markdown");
    }

    #[test]
    fn find_project_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root_from(&sub_dir);
        let expected = dir.path().canonicalize().ok();
        let actual = root.and_then(|p| p.canonicalize().ok());
        assert_eq!(actual, expected);
    }

    #[test]
    fn missing_project_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_project_config(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }
}
