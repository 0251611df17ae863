use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid element identifier: {0} (expected 0..=4)")]
    InvalidElement(u8),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
