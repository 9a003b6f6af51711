use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
///
/// Bill-level failures (`InvalidBillId`, `UnknownTitleType`, `MissingField`)
/// are fatal for the one bill that produced them; the pipeline yields them
/// per document so a malformed bill never aborts the batch.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("File path error: {0}")]
    Path(String),

    #[error("Invalid bill id: {0}")]
    InvalidBillId(String),

    #[error("Unknown title type: {0}")]
    UnknownTitleType(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
