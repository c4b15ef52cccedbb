use p3a_interfaces::ApiError;
use thiserror::Error;

/// Specific errors originating strictly from the core crate logic.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration loading failed: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    LoggingSetup(String),
}

// Conversion from CoreError to the public API error
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConfigLoad(e) => ApiError::Configuration(e.to_string()),
            CoreError::InvalidConfig(reason) => ApiError::Configuration(reason),
            CoreError::LoggingSetup(reason) => {
                ApiError::InternalError(format!("Logging setup failed: {}", reason))
            }
        }
    }
}
