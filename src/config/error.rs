//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout (must be 1..=600 seconds)")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("AI model must not be empty")]
    MissingModel,

    #[error("Invalid AI timeout (must be 1..=600 seconds)")]
    InvalidAiTimeout,

    #[error("AI max_retries exceeds maximum allowed (10)")]
    TooManyRetries,

    #[error("AI max_tokens must be positive")]
    InvalidMaxTokens,

    #[error("AI temperature must be between 0.0 and 2.0")]
    InvalidTemperature,
}
