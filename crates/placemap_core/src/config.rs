//! Runtime configuration for the catalogue core.
//!
//! # Responsibility
//! - Provide defaults for the API endpoint, request timeout, view-state store and logging.
//! - Override defaults from `PLACEMAP_*` environment variables.
//!
//! # Invariants
//! - Unset or blank variables keep their default.
//! - A set but invalid variable is an error, never silently ignored.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_ENV: &str = "PLACEMAP_API_URL";
pub const API_TIMEOUT_SECS_ENV: &str = "PLACEMAP_API_TIMEOUT_SECS";
pub const VIEW_STATE_DB_ENV: &str = "PLACEMAP_VIEW_STATE_DB";
pub const LOG_LEVEL_ENV: &str = "PLACEMAP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PLACEMAP_LOG_DIR";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidApiUrl(String),
    InvalidTimeout(String),
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidApiUrl(value) => {
                write!(f, "{API_URL_ENV} must be an http(s) URL, got `{value}`")
            }
            Self::InvalidTimeout(value) => write!(
                f,
                "{API_TIMEOUT_SECS_ENV} must be 1..={MAX_REQUEST_TIMEOUT_SECS} seconds, got `{value}`"
            ),
            Self::InvalidLogLevel(value) => {
                write!(f, "{LOG_LEVEL_ENV} has unsupported value `{value}`")
            }
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// `None` keeps view state in memory only.
    pub view_state_db: Option<PathBuf>,
    pub log_level: &'static str,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            view_state_db: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, so tests never touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut config = Self::default();

        if let Some(url) = value(API_URL_ENV) {
            config.api_base_url = parse_api_url(&url)?;
        }
        if let Some(secs) = value(API_TIMEOUT_SECS_ENV) {
            config.request_timeout = parse_timeout(&secs)?;
        }
        if let Some(path) = value(VIEW_STATE_DB_ENV) {
            config.view_state_db = Some(PathBuf::from(path));
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            config.log_level =
                normalize_level(&level).map_err(|_| ConfigError::InvalidLogLevel(level))?;
        }
        if let Some(dir) = value(LOG_DIR_ENV) {
            let dir = PathBuf::from(dir);
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let has_host = ["http://", "https://"]
        .iter()
        .find_map(|scheme| raw.strip_prefix(scheme))
        .is_some_and(|rest| !rest.trim_matches('/').is_empty());
    if !has_host {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if (1..=MAX_REQUEST_TIMEOUT_SECS).contains(&secs) => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
