use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Root settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    pub db_config: DatabaseSettings,
    /// Directory scanned for bundle files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl EtlConfig {
    pub fn validate(&self) -> Result<()> {
        self.db_config.validate()?;

        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(format!(
                "logging.level must be one of {VALID_LOG_LEVELS:?}"
            )));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::validation("data_dir must not be empty"));
        }
        Ok(())
    }
}

/// Connection settings for the destination database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DatabaseSettings {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation("db_config.host must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::validation("db_config.port must be > 0"));
        }
        if self.dbname.trim().is_empty() {
            return Err(ConfigError::validation("db_config.dbname must not be empty"));
        }
        if self.user.trim().is_empty() {
            return Err(ConfigError::validation("db_config.user must not be empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            host: "localhost".into(),
            port: 5432,
            dbname: "fhir".into(),
            user: "postgres".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_fields() {
        let mut s = settings();
        s.host = " ".into();
        assert!(matches!(s.validate(), Err(ConfigError::Validation(_))));

        let mut s = settings();
        s.dbname = String::new();
        assert!(s.validate().is_err());

        let mut s = settings();
        s.user = String::new();
        assert!(s.validate().is_err());

        let mut s = settings();
        s.port = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_empty_password_allowed() {
        let mut s = settings();
        s.password = String::new();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("localhost"));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let config = EtlConfig {
            db_config: settings(),
            data_dir: default_data_dir(),
            logging: LoggingSettings {
                level: "verbose".into(),
            },
        };
        assert!(config.validate().is_err());

        let config = EtlConfig {
            logging: LoggingSettings {
                level: "DEBUG".into(),
            },
            ..config
        };
        assert!(config.validate().is_ok());
    }
}
