use thiserror::Error;

/// Errors emitted by the row sinks.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("xml error: {0}")]
    Xml(String),
    #[error(transparent)]
    Core(#[from] rowgen_core::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
