use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Authentication error: {0}")]
    #[diagnostic(code(aikaikkuna::authentication))]
    Authentication(String),

    #[error("Calendar backend error: {0}")]
    #[diagnostic(code(aikaikkuna::upstream))]
    Upstream(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(aikaikkuna::validation))]
    Validation(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(aikaikkuna::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(aikaikkuna::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(aikaikkuna::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(aikaikkuna::serialization))]
    Serialization(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CalResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Authentication(message.to_string())
}

/// Helper to create calendar backend errors
pub fn upstream_error(message: &str) -> Error {
    Error::Upstream(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}
