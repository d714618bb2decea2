//! Unified error types for noisemon
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error reading raw samples
    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Smoothing factor outside (0, 1]
    #[error("Invalid smoothing factor: {0} (must be in (0, 1])")]
    InvalidSmoothingFactor(f64),

    /// Thresholds must be strictly ascending
    #[error("Thresholds must be strictly ascending: regular={regular}, high={high}, toxic={toxic}")]
    UnorderedThresholds { regular: f64, high: f64, toxic: f64 },

    /// Thresholds must be positive and finite
    #[error("Threshold must be positive: {0}")]
    NonPositiveThreshold(f64),

    /// Monitor configuration rejected
    #[error("Invalid monitor '{id}': {message}")]
    InvalidMonitor { id: String, message: String },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse config file
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// A value type inside the configuration was rejected
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidValue`]
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Errors from raw sample sources
#[derive(Error, Debug)]
pub enum SensorError {
    /// A sample line could not be parsed as a raw ADC reading
    #[error("Invalid sample on line {line}: '{value}'")]
    InvalidSample { line: usize, value: String },

    /// Underlying reader failed
    #[error("Sample source IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
