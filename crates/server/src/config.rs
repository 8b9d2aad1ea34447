//! # Application Configuration
//!
//! This module defines the configuration structure for the `repostly-server` and
//! provides the logic for loading it from an optional `config.yml` file and
//! environment variables. Every key has a default, so the server starts with
//! no file at all.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use repostly::GenerationSettings;
use repostly_ocr::OcrOptions;
use repostly_web::FetchOptions;
use serde::Deserialize;
use std::env;
use std::fs;
use std::sync::LazyLock;
use tracing::info;

/// Default location of the optional configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("env var pattern is valid")
});

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The main application configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on request bodies accepted by `/analyze`.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub fetch: FetchOptions,
    #[serde(default)]
    pub ocr: OcrOptions,
    #[serde(default)]
    pub generation: GenerationSettings,
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            fetch: FetchOptions::default(),
            ocr: OcrOptions::default(),
            generation: GenerationSettings::default(),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = ENV_VAR_RE.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from an optional file and environment variables.
///
/// - The file is `config_path_override`, else `$REPOSTLY_CONFIG`, else `config.yml`
///   in the working directory. Only an explicitly named file must exist.
/// - `${VAR}` references in the file are replaced with environment values.
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `REPOSTLY_...` variables (e.g., `REPOSTLY_GENERATION__MODEL`).
/// - `OPENAI_API_KEY` is used when no generation key is configured.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let (config_path, required) = match config_path_override {
        Some(path) => (path.to_string(), true),
        None => match env::var("REPOSTLY_CONFIG") {
            Ok(path) if !path.is_empty() => (path, true),
            _ => (DEFAULT_CONFIG_PATH.to_string(), false),
        },
    };

    match read_and_substitute(&config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if required => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{config_path}'."
            )));
        }
        None => info!("No '{config_path}' found; using defaults and environment."),
    }

    let settings = builder
        // Top-level keys like PORT.
        .add_source(Environment::default())
        // Nested overrides like REPOSTLY_GENERATION__MODEL.
        .add_source(
            Environment::with_prefix("REPOSTLY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    config.generation.api_key = non_empty(config.generation.api_key.take())
        .or_else(|| non_empty(env::var("OPENAI_API_KEY").ok()));
    config.generation.api_url = non_empty(config.generation.api_url.take());

    Ok(config)
}
