use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordleError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// A wordle with zero answers cannot be laid out.
    #[error("No answers to lay out")]
    EmptyInput,

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type WordleResult<T> = Result<T, WordleError>;
