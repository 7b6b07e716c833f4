use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TsaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Listing tool failed: {0}")]
    ListingError(String),

    #[error("Control tool failed: {0}")]
    ControlError(String),

    #[error("Server file error: {0}")]
    ServerFileError(String),
}

pub type Result<T> = std::result::Result<T, TsaError>;
