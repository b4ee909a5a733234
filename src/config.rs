use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_loopback_interfaces")]
    pub loopback_interfaces: Vec<String>,
    #[serde(default = "default_max_path_chars")]
    pub max_path_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            loopback_interfaces: default_loopback_interfaces(),
            max_path_chars: default_max_path_chars(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.max_path_chars < MIN_PATH_CHARS {
            return Err(ConfigError::Validation(format!(
                "max_path_chars must be >= {MIN_PATH_CHARS}"
            )));
        }
        if self.loopback_interfaces.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "loopback_interfaces[*] must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

// Room for at least one character plus the ellipsis.
const MIN_PATH_CHARS: usize = 4;

fn default_title() -> String {
    "Server Inspection Report".to_string()
}

fn default_loopback_interfaces() -> Vec<String> {
    vec!["lo".to_string(), "lo0".to_string()]
}

const fn default_max_path_chars() -> usize {
    100
}
