use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::utils::url::normalize_base_url;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
pub const DEFAULT_BACKEND_URL: &str = "https://synthwell-prototype-production.up.railway.app";

pub const GATEWAY_URL_ENV: &str = "TERRYANN_GATEWAY_URL";
pub const BACKEND_URL_ENV: &str = "TERRYANN_BACKEND_URL";
pub const USER_ID_ENV: &str = "TERRYANN_USER_ID";

/// Settings as written in `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub gateway_url: Option<String>,
    pub backend_url: Option<String>,
    pub user_id: Option<String>,
}

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path_display(path), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Render a path with the home directory shortened to `~`.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            if let Ok(relative) = path.strip_prefix(PathBuf::from(home)) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// `config.toml` in the platform config directory, if one can be determined.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "terryann").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Config, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Config::default()),
        }
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides and defaults.
    pub fn resolve(self, auth_token: Option<String>) -> ResolvedConfig {
        self.resolve_with(|key| std::env::var(key).ok(), auth_token)
    }

    pub fn resolve_with<E>(self, env: E, auth_token: Option<String>) -> ResolvedConfig
    where
        E: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, file_value: Option<String>| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or(file_value.filter(|value| !value.trim().is_empty()))
        };

        let gateway_url = pick(GATEWAY_URL_ENV, self.gateway_url)
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let backend_url = pick(BACKEND_URL_ENV, self.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        ResolvedConfig {
            gateway_url: normalize_base_url(&gateway_url),
            backend_url: normalize_base_url(&backend_url),
            user_id: pick(USER_ID_ENV, self.user_id).map(|id| id.trim().to_string()),
            auth_token,
        }
    }
}

/// Effective settings for one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub gateway_url: String,
    pub backend_url: String,
    pub user_id: Option<String>,
    pub auth_token: Option<String>,
}
