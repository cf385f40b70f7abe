use ringline::BufferError;
use thiserror::Error;

/// Errors that can occur while pumping lines out of a stream
#[derive(Error, Debug)]
pub enum PumpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pump operations
pub type PumpResult<T> = Result<T, PumpError>;
