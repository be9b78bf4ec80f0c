//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_ANALYSIS_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-flash-preview";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub gemini_api_key: Option<String>,
    pub analysis_api_base: String,
    pub analysis_model: String,
    pub preferences_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Analysis Service ---
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());

        let analysis_api_base = lookup("ANALYSIS_API_BASE")
            .unwrap_or_else(|| DEFAULT_ANALYSIS_API_BASE.to_string());
        if !analysis_api_base.starts_with("http://") && !analysis_api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "ANALYSIS_API_BASE".to_string(),
                format!("'{}' is not an http(s) URL", analysis_api_base),
            ));
        }

        let analysis_model =
            lookup("ANALYSIS_MODEL").unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string());

        // --- Local Preferences ---
        let preferences_path = lookup("PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./careconnect_prefs.json"));

        Ok(Self {
            log_level,
            gemini_api_key,
            analysis_api_base,
            analysis_model,
            preferences_path,
        })
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))
    }
}
