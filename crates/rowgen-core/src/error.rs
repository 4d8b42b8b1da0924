use thiserror::Error;

/// Errors emitted by field construction, generation, and persistence.
#[derive(Debug, Error)]
pub enum Error {
    /// The factory was asked for a field kind it does not know.
    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),
    /// A dataset names an output format the sink registry does not know.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
    /// A field configuration failed validation.
    #[error("invalid field config: {0}")]
    InvalidConfig(String),
    /// The custom field's source file failed the existence/extension check.
    #[error("custom source unavailable: {0}")]
    SourceUnavailable(String),
    /// Unique generation was requested with too few source candidates.
    #[error(
        "unique pool exhausted: {required} unique values required, {available} candidates available"
    )]
    UniquePoolExhausted { required: u64, available: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by rowgen crates.
pub type Result<T> = std::result::Result<T, Error>;
