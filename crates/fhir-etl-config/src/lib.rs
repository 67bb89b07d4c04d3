//! Settings for the fhir-etl loader.
//!
//! Settings come from a JSON file (`config.json` by default) holding a
//! `db_config` section, with the database keys individually overridable from
//! the environment:
//!
//! | key                  | environment   |
//! |----------------------|---------------|
//! | `db_config.host`     | `DB_HOST`     |
//! | `db_config.port`     | `DB_PORT`     |
//! | `db_config.dbname`   | `DB_NAME`     |
//! | `db_config.user`     | `DB_USER`     |
//! | `db_config.password` | `DB_PASSWORD` |
//!
//! The environment always wins over the file.

pub mod loader;
pub mod settings;

use std::path::PathBuf;

pub use loader::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, ENV_OVERRIDES, load_config, load_config_with_env,
    resolve_config_path,
};
pub use settings::{DatabaseSettings, EtlConfig, LoggingSettings};

/// Error types for settings loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
