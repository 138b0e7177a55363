//! Configuration management for stockdash.
//!
//! Loads `stockdash.toml`; every section and field is optional.
//!
//! ```toml
//! [general]
//! data_dir = "data"
//! log_file = "stockdash.log"
//! default_market = "NYSE"
//! default_duration = "1M"
//!
//! [http]
//! timeout_ms = 10000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::DEFAULT_USER_AGENT;
use crate::{DurationLabel, Market};

pub const DEFAULT_CONFIG_FILE: &str = "stockdash.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding `<TICKER>_data.json` files.
    pub data_dir: PathBuf,
    /// Log destination; an empty string logs to stderr.
    pub log_file: Option<PathBuf>,
    pub default_market: Market,
    pub default_duration: DurationLabel,
}

impl GeneralConfig {
    /// The log file to append to, or `None` for stderr.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            log_file: Some(PathBuf::from("stockdash.log")),
            default_market: Market::default(),
            default_duration: DurationLabel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else `./stockdash.toml` when present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            default_market = "NYSE"
            default_duration = "YTD"
            "#,
        )
        .expect("parse");

        assert_eq!(config.general.default_market, Market::Nyse);
        assert_eq!(config.general.default_duration, DurationLabel::YearToDate);
        assert_eq!(config.general.data_dir, PathBuf::from("."));
        assert_eq!(config.http.timeout_ms, 10_000);
    }

    #[test]
    fn rejects_unknown_duration() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [general]
            default_duration = "2W"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_explicit_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[http]\ntimeout_ms = 2500\n").expect("write");

        let config = Config::resolve(Some(&path)).expect("load");
        assert_eq!(config.http.timeout_ms, 2_500);
        assert_eq!(config.general.default_duration, DurationLabel::FiveDays);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let err = Config::resolve(Some(&dir.path().join("absent.toml"))).expect_err("must fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn empty_log_file_means_stderr() {
        let config: Config = toml::from_str("[general]\nlog_file = \"\"\n").expect("parse");
        assert_eq!(config.general.log_path(), None);

        let config = Config::default();
        assert_eq!(config.general.log_path(), Some(Path::new("stockdash.log")));
    }
}
