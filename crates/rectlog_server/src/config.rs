//! Process configuration read from the environment.
//!
//! # Responsibility
//! - Resolve bind address, database path and logging options.
//! - Reject malformed values before any resource is opened.
//!
//! # Invariants
//! - Every setting has a default, so an empty environment is valid.

use rectlog_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

pub const ENV_HTTP_BIND: &str = "RECTLOG_HTTP_BIND";
pub const ENV_DB_PATH: &str = "RECTLOG_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "RECTLOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RECTLOG_LOG_DIR";

pub const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_PATH: &str = "inputs.db";

#[derive(Debug)]
pub enum ConfigError {
    InvalidBind {
        value: String,
        source: AddrParseError,
    },
    EmptyDbPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBind { value, source } => {
                write!(f, "{ENV_HTTP_BIND} `{value}` is not a socket address: {source}")
            }
            Self::EmptyDbPath => write!(f, "{ENV_DB_PATH} cannot be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBind { source, .. } => Some(source),
            Self::EmptyDbPath => None,
        }
    }
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    /// Passed to `init_logging`, which validates it.
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_text = read(ENV_HTTP_BIND).unwrap_or_else(|| DEFAULT_HTTP_BIND.to_string());
        let bind = bind_text
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_text.clone(),
                source,
            })?;

        let db_path = match lookup(ENV_DB_PATH) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyDbPath),
            Some(value) => PathBuf::from(value.trim()),
            None => PathBuf::from(DEFAULT_DB_PATH),
        };

        Ok(Self {
            bind,
            db_path,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR),
        })
    }
}
