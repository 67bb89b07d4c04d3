use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use tracing::debug;

use crate::{ConfigError, EtlConfig, Result};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "FHIR_ETL_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Environment variables and the settings keys they replace.
pub const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("DB_HOST", "db_config.host"),
    ("DB_PORT", "db_config.port"),
    ("DB_NAME", "db_config.dbname"),
    ("DB_USER", "db_config.user"),
    ("DB_PASSWORD", "db_config.password"),
];

/// Settings file path from `FHIR_ETL_CONFIG`, or `config.json`.
pub fn resolve_config_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(CONFIG_PATH_ENV)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads settings from `path`, applying overrides from the process environment.
pub fn load_config(path: impl AsRef<Path>) -> Result<EtlConfig> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Loads settings from `path`, reading overrides through `lookup`.
pub fn load_config_with_env<F>(path: impl AsRef<Path>, lookup: F) -> Result<EtlConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut builder = Config::builder()
        .add_source(File::from(path.to_path_buf()).format(FileFormat::Json).required(true));

    for (var, key) in ENV_OVERRIDES {
        let Some(value) = lookup(var) else {
            continue;
        };
        debug!(var, key, "Applying environment override");
        builder = if key == "db_config.port" {
            let port: u16 = value.trim().parse().map_err(|_| {
                ConfigError::validation(format!("{var} must be a port number, got '{value}'"))
            })?;
            builder.set_override(key, i64::from(port))?
        } else {
            builder.set_override(key, value)?
        };
    }

    let config: EtlConfig = builder.build()?.try_deserialize()?;
    config.validate()?;

    debug!(
        path = %path.display(),
        host = %config.db_config.host,
        port = config.db_config.port,
        dbname = %config.db_config.dbname,
        "Loaded settings"
    );

    Ok(config)
}
