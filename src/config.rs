//! Application-level configuration loading, including where the name corpus lives.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::predictor::tokenizer::DEFAULT_MAX_LEN;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "HARMONY_PALETTE_CONFIG_PATH";
/// Reference corpus of color names used to fit the tokenizer.
const DEFAULT_CORPUS_PATH: &str = "colors.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    corpus_path: PathBuf,
    max_name_length: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration stored at `path`, falling back to built-in defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        corpus = %app_config.corpus_path.display(),
                        max_name_length = app_config.max_name_length,
                        "loaded config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "invalid config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse and validate the JSON configuration document.
    fn parse(contents: &str) -> Result<Self, ConfigError> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        raw.validate()?;
        Ok(raw.into())
    }

    /// CSV file holding the reference color names.
    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    /// Number of name characters fed to the model.
    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            max_name_length: DEFAULT_MAX_LEN,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Debug, Deserialize, Validate)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default = "default_corpus_path")]
    #[validate(length(min = 1))]
    corpus_path: String,
    #[serde(default = "default_max_name_length")]
    #[validate(range(min = 1, max = 256))]
    max_name_length: usize,
}

fn default_corpus_path() -> String {
    DEFAULT_CORPUS_PATH.to_string()
}

fn default_max_name_length() -> usize {
    DEFAULT_MAX_LEN
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            corpus_path: PathBuf::from(value.corpus_path),
            max_name_length: value.max_name_length,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
