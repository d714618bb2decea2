//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::domain::ClassificationMode;
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path that cannot be loaded is an error. An invalid file
    /// found in a default location is skipped with a warning.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                self.config = ConfigFile::load(path)?;
                log::info!("Loaded config from {}", path);
            }
            None => match ConfigFile::load_default() {
                Ok(Some((_, config))) => self.config = config,
                Ok(None) => log::debug!("No config file found, using defaults"),
                Err(e) => log::warn!("Ignoring invalid config file, using defaults: {}", e),
            },
        }
        Ok(self)
    }

    /// Override with CLI sample interval
    pub fn with_sample_interval(mut self, interval_ms: Option<u64>) -> Self {
        if let Some(i) = interval_ms {
            self.config.timing.sample_interval_ms = i;
        }
        self
    }

    /// Override with CLI classification mode
    pub fn with_mode(mut self, mode: Option<ClassificationMode>) -> Self {
        if let Some(m) = mode {
            self.config.signal.mode = m;
        }
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_sample_interval(Some(10))
            .with_mode(Some(ClassificationMode::Absolute))
            .build()
            .unwrap();
        assert_eq!(config.timing.sample_interval_ms, 10);
        assert_eq!(config.signal.mode, ClassificationMode::Absolute);
    }

    #[test]
    fn test_builder_rejects_invalid_override() {
        let result = ConfigBuilder::new().with_sample_interval(Some(0)).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_file_then_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nsample_interval_ms = 25").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = ConfigBuilder::new()
            .with_file(Some(&path))
            .unwrap()
            .with_mode(Some(ClassificationMode::Absolute))
            .build()
            .unwrap();
        assert_eq!(config.timing.sample_interval_ms, 25);
        assert_eq!(config.signal.mode, ClassificationMode::Absolute);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(ConfigBuilder::new()
            .with_file(Some("/nonexistent/noisemon.toml"))
            .is_err());
    }
}
