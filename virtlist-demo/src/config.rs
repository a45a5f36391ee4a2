//! Demo settings, read from `config.json` in the config directory.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use thiserror::Error;
use virtlist::ListMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// One of `grow`, `fixed`, `measured`, `variable`.
    pub mode: String,
    pub item_count: usize,
    pub min_height: u32,
    pub max_height: u32,
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: ListMode::ViewportVariableItems.to_string(),
            item_count: 100_000,
            min_height: 1,
            max_height: 4,
            log_level: "debug".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.list_mode()?;
        self.level_filter()?;
        if self.min_height == 0 || self.min_height > self.max_height {
            return Err(ConfigError::Invalid(format!(
                "row heights must satisfy 0 < min_height <= max_height, got {}..={}",
                self.min_height, self.max_height
            )));
        }
        Ok(())
    }

    pub fn list_mode(&self) -> Result<ListMode, ConfigError> {
        self.mode.parse().map_err(ConfigError::Invalid)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }
}
