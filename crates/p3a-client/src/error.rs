//! Errors specific to reporter construction and reporting.

use p3a_core::CoreError;
use p3a_interfaces::ApiError;
use p3a_message::MessageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration loading failed: {0}")]
    ConfigError(#[from] CoreError),

    #[error("Message formatting failed: {0}")]
    Message(#[from] MessageError),
}

// Convert ClientError to ApiError for the final user-facing result
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ConfigError(e) => e.into(),
            ClientError::Message(e) => e.into(),
        }
    }
}
