//! Server configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PORT;
use crate::error::{ConfError, ConfResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/confsched";
static DEFAULT_BIND: &str = "127.0.0.1";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration at ~/.config/confsched/config.toml, overridable with
/// `CONFSCHED_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfschedConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// IANA timezone for day matching; the host's local zone when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for ConfschedConfig {
    fn default() -> Self {
        ConfschedConfig {
            data_dir: default_data_dir(),
            bind: default_bind(),
            port: default_port(),
            timezone: None,
        }
    }
}

impl ConfschedConfig {
    pub fn config_path() -> ConfResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfError::Config("Could not determine config directory".into()))?
            .join("confsched");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config file
    /// on first run.
    pub fn load() -> ConfResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::create_default_config(&path)?;
        }
        Self::load_from(&path)
    }

    /// Load from `path` (optional) layered under the environment.
    pub fn load_from(path: &Path) -> ConfResult<Self> {
        let config: ConfschedConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CONFSCHED"))
            .build()
            .map_err(|e| ConfError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfError::Config(e.to_string()))?;

        config.timezone()?;
        Ok(config)
    }

    /// Data directory with `~` expanded
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn timezone(&self) -> ConfResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| ConfError::Config(format!("Unknown timezone '{name}'")))
            })
            .transpose()
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ConfResult<()> {
        let contents = format!(
            "\
# confsched configuration

# Where events, comments and settings are stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Address and port the server listens on:
# bind = \"{DEFAULT_BIND}\"
# port = {DEFAULT_PORT}

# Timezone used to decide which day an event falls on (defaults to the host's):
# timezone = \"Europe/Helsinki\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ConfError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        ConfschedConfig::create_default_config(&path).unwrap();
        let config = ConfschedConfig::load_from(&path).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.timezone().unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfschedConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/confsched\"\nport = 8080\ntimezone = \"Europe/Helsinki\"\n",
        )
        .unwrap();

        let config = ConfschedConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/confsched"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Europe::Helsinki));
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = \"Mars/Olympus\"\n").unwrap();

        let err = ConfschedConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfError::Config(_)));
    }

    #[test]
    fn test_data_path_expands_tilde() {
        let config = ConfschedConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
