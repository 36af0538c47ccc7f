//! Error type definitions

use thiserror::Error;

/// Result type alias for the authorization core
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Main error type for the authorization core
#[derive(Error, Debug)]
pub enum AuthzError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors (bad credentials, unknown user)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A role, resource or action name could not be parsed
    #[error("Parsing error: {0}")]
    Parse(String),

    /// A guard declaration supplied zero or several requirement variants
    #[error("Invalid access requirement: {0}")]
    InvalidRequirement(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AuthzError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::Config(_) => "CONFIG_ERROR",
            AuthzError::Yaml(_) => "YAML_ERROR",
            AuthzError::Serialization(_) => "SERIALIZATION_ERROR",
            AuthzError::Io(_) => "IO_ERROR",
            AuthzError::Auth(_) => "AUTH_ERROR",
            AuthzError::Parse(_) => "PARSING_ERROR",
            AuthzError::InvalidRequirement(_) => "INVALID_REQUIREMENT",
            AuthzError::Crypto(_) => "CRYPTO_ERROR",
            AuthzError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether the error was caused by caller input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthzError::Auth(_)
                | AuthzError::Parse(_)
                | AuthzError::InvalidRequirement(_)
                | AuthzError::Validation(_)
        )
    }
}
