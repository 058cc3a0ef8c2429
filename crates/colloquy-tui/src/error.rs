//! Error types for the colloquy-tui crate

use std::io;
use thiserror::Error;

/// Result type alias for colloquy-tui operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for colloquy-tui
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal I/O errors
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Store errors from colloquy-core
    #[error("Core error: {0}")]
    Core(#[from] colloquy_core::Error),

    /// UI rendering errors
    #[error("UI rendering error: {0}")]
    Rendering(String),

    /// Invalid state errors
    #[error("Invalid UI state: {0}")]
    InvalidState(String),
}
