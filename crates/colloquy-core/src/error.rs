use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A transition addressed a position that does not hold a message.
    #[error("Message index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A decoded transition carried a kind this store does not know.
    #[error("Unsupported transition: {0}")]
    UnsupportedTransition(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Failed to serialize preferences: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
