//! TOML-based configuration for Mosaic.
//!
//! Supports a config file (mosaic.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [ingest]
//! delimiter = ";"
//! trim = true
//!
//! [storage]
//! path = "${HOME}/reports/report.db"
//!
//! [output]
//! format = "json"
//! precision = 2
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::CsvOptions;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// CSV ingestion settings.
    pub ingest: IngestSettings,

    /// Report persistence settings.
    pub storage: StorageSettings,

    /// CLI output settings.
    pub output: OutputSettings,
}

/// CSV ingestion settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Field delimiter; must be a single ASCII character.
    pub delimiter: String,

    /// Trim whitespace around cells.
    pub trim: bool,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            trim: true,
        }
    }
}

impl IngestSettings {
    /// Convert to reader options, validating the delimiter.
    pub fn csv_options(&self) -> Result<CsvOptions, SettingsError> {
        let delimiter = match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => *b,
            _ => {
                return Err(SettingsError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                )))
            }
        };
        Ok(CsvOptions {
            delimiter,
            trim: self.trim,
        })
    }
}

/// Report persistence settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path to the report database (supports ${ENV_VAR} expansion).
    /// Defaults to `~/.mosaic/report.db`.
    pub path: Option<String>,
}

impl StorageSettings {
    /// Get the configured path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.path
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }
}

/// How the CLI prints result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// CLI output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,

    /// Decimal places shown in text tables.
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 1,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MOSAIC_CONFIG`
    /// 2. `./mosaic.toml`
    /// 3. `~/.config/mosaic/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("MOSAIC_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("mosaic.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mosaic").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
