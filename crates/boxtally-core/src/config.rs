// Configuration loading and parsing (config/boxtally.toml).
//
// Every key is optional; a missing default config file means built-in
// defaults. The tallied team is not configurable (see `api::BRAVES`).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where `load_config` looks when no path is given, relative to the cwd.
pub const DEFAULT_CONFIG_PATH: &str = "config/boxtally.toml";

const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";
const DEFAULT_OUTPUT_PATH: &str = "braves_player_season_totals.csv";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
}

/// Stats API endpoint and schedule filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub sport_id: u32,
    /// Schedule game-type filter; "R" is regular season.
    pub game_type: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sport_id: 1,
            game_type: "R".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate config from TOML text. `path` is only used in errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load config from `path` if given (it must exist), otherwise from
/// [`DEFAULT_CONFIG_PATH`] when present, otherwise use defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => parse_config(&read_file(path)?, path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                parse_config(&read_file(default_path)?, default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.api.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must be an http(s) URL, got {base_url:?}"),
        });
    }

    if config.api.game_type.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.game_type".into(),
            message: "must not be empty".into(),
        });
    }

    if config.output.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "output.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
