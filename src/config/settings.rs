use crate::command::DEFAULT_COMMIT_MESSAGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub commit: CommitConfig,
    pub behavior: BehaviorConfig,
    pub audit: AuditConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CommitConfig {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit non-zero when any git command fails
    pub strict: bool,
    pub color: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            strict: false,
            color: true,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("mgit"))
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Where the audit log goes: the configured path, else ~/.config/mgit/history.log
    pub fn audit_log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.audit.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("history.log")),
        }
    }

    /// Commit message from `-m` if given, else from the file
    pub fn commit_message(&self, flag: Option<String>) -> String {
        flag.unwrap_or_else(|| self.commit.message.clone())
    }

    /// Strict when either `--strict` or `behavior.strict` asks for it
    pub fn strict(&self, flag: bool) -> bool {
        flag || self.behavior.strict
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.commit.message.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "commit.message must not be empty".to_string(),
            ));
        }

        if let Some(path) = &self.audit.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "audit.path must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
