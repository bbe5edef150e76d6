//! Runtime configuration for the `blog` binary.
//!
//! Sources, later wins: built-in defaults, TOML file, `BLOG_*` environment
//! variables, command-line flags.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "BLOG_DB_PATH";
pub const ENV_LOG_DIR: &str = "BLOG_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "BLOG_LOG_LEVEL";

const APP_DIR_NAME: &str = "blog";
const DB_FILE_NAME: &str = "blog.sqlite3";

/// Settings as they appear in `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from disk and the process environment.
    ///
    /// An explicit `config_path` must exist; the default path is read only
    /// when present.
    pub fn load(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<Self> {
        let file = match config_path {
            Some(path) => read_config_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config_file(&path)?,
                _ => ConfigFile::default(),
            },
        };

        Self::resolve(file, |key| std::env::var(key).ok(), db_override)
    }

    /// Merges file settings, environment lookups and flag overrides.
    pub fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
        db_override: Option<PathBuf>,
    ) -> Result<Self> {
        let env_value = |key: &str| {
            env(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let data_dir = dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME));

        let db_path = db_override
            .or_else(|| env_value(ENV_DB_PATH).map(PathBuf::from))
            .or(file.db_path)
            .or_else(|| data_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME)));
        let Some(db_path) = db_path else {
            bail!("database path is not configured; set {ENV_DB_PATH} or `db_path` in config.toml");
        };

        let log_dir = env_value(ENV_LOG_DIR)
            .map(PathBuf::from)
            .or(file.log_dir)
            .or_else(|| data_dir.as_ref().map(|dir| dir.join("logs")));
        let Some(log_dir) = log_dir else {
            bail!("log directory is not configured; set {ENV_LOG_DIR} or `log_dir` in config.toml");
        };

        let log_level = env_value(ENV_LOG_LEVEL)
            .or(file.log_level)
            .unwrap_or_else(|| blog_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

/// `<config dir>/blog/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file `{}`", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file `{}`", path.display()))
}
