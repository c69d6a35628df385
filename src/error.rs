//! Error types for the midisong library

use std::io;

/// Library error type for midisong operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SongError {
    /// Malformed or unsupported structural data in a MIDI file
    #[error("format error: {0}")]
    FormatError(String),

    /// A song event was built with fields violating its invariants
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A data field was requested that the event does not carry
    #[error("missing field: {0}")]
    MissingFieldError(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for SongError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
