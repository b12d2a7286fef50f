//! Startup configuration read from the process environment.

use std::path::PathBuf;

use finder_engine::{ApiConfig, ConfigError};
use log::LevelFilter;

pub const LOG_FILE_VAR: &str = "FINDER_LOG_FILE";
pub const LOG_LEVEL_VAR: &str = "FINDER_LOG_LEVEL";
pub const DEFAULT_LOG_FILE: &str = "./finder.log";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AppConfigError {
    #[error(transparent)]
    Api(#[from] ConfigError),
    #[error("invalid FINDER_LOG_LEVEL value {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiConfig::from_lookup(&lookup)?;

        let log_file = lookup(LOG_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let log_level = match lookup(LOG_LEVEL_VAR) {
            None => LevelFilter::Info,
            Some(raw) => finder_logging::parse_level(&raw)
                .ok_or(AppConfigError::InvalidLogLevel(raw))?,
        };

        Ok(Self {
            api,
            log_file,
            log_level,
        })
    }
}
