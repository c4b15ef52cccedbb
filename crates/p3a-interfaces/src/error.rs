use thiserror::Error;

/// Represents common high-level errors surfaced to callers reporting metrics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid parameters were provided to an API method.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A date in the metainfo decomposed into an impossible calendar year.
    /// The host clock or date conversion is broken; the record must be dropped.
    #[error("Invalid date for '{field}': year {year}")]
    InvalidDate { field: &'static str, year: i32 },

    /// A field value would corrupt the flattened record.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An internal error occurred within the reporting library. This may indicate a bug.
    #[error("Internal error: {0}")]
    InternalError(String),
}
