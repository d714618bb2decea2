//! Configuration file loading
//!
//! Handles loading and writing configuration as TOML.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "NOISEMON_CONFIG";

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load and validate configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    ///
    /// `Ok(None)` when no file exists. A file that exists but is invalid is
    /// an error, not skipped.
    pub fn load_default() -> Result<Option<(PathBuf, Config)>, ConfigError> {
        match Self::find_default() {
            Some(path) => {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }

    /// First default path that exists
    pub fn find_default() -> Option<PathBuf> {
        Self::default_paths().into_iter().find(|p| p.exists())
    }

    /// Default configuration file paths, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/noisemon/config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("noisemon").join("config.toml"));
        }

        paths.push(PathBuf::from("noisemon.toml"));
        paths
    }

    /// Write `config` as TOML, creating parent directories
    pub fn save<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = config.to_toml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, text)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_paths_order() {
        let paths = ConfigFile::default_paths();
        assert_eq!(paths[0], PathBuf::from("/etc/noisemon/config.toml"));
        assert_eq!(paths.last(), Some(&PathBuf::from("noisemon.toml")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[alert]\nmax_alerts = 6").unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.alert.max_alerts, 6);
        assert_eq!(config.monitors.len(), 2);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nsample_interval_ms = 0").unwrap();
        assert!(matches!(
            ConfigFile::load(file.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[alert\nmax_alerts = ").unwrap();
        assert!(matches!(
            ConfigFile::load(file.path()),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.alert.beeps = 2;
        ConfigFile::save(&config, &path).unwrap();

        assert_eq!(ConfigFile::load(&path).unwrap(), config);
    }
}
