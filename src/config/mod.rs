//! Configuration module for Mosaic.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, IngestSettings, OutputFormat, OutputSettings, Settings, SettingsError,
    StorageSettings,
};
