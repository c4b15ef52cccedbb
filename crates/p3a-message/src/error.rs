use p3a_interfaces::ApiError;
use thiserror::Error;

/// Reasons a metric sample cannot be turned into a record.
///
/// Any of these drops the record; nothing is sent with partial data.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Metric name must not be empty")]
    EmptyMetricName,

    /// The local-time decomposition of a metainfo date gave an impossible year.
    #[error("Implausible year {year} extracted from '{field}'")]
    ImplausibleYear { field: &'static str, year: i32 },

    #[error("Invalid star separators: {0}")]
    InvalidSeparators(String),

    #[error("Value of '{key}' contains a star separator: {value:?}")]
    SeparatorCollision { key: &'static str, value: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<MessageError> for ApiError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::EmptyMetricName => {
                ApiError::InvalidParameters("metric name must not be empty".into())
            }
            MessageError::ImplausibleYear { field, year } => ApiError::InvalidDate { field, year },
            MessageError::InvalidSeparators(reason) => ApiError::Configuration(reason),
            e @ MessageError::SeparatorCollision { .. } => ApiError::MalformedRecord(e.to_string()),
            MessageError::Serialization(e) => ApiError::InternalError(e.to_string()),
        }
    }
}
