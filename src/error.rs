use std::io;
use thiserror::Error;

/// Error type for the fallible edges of charset guessing.
///
/// Guessing itself never fails; these come from reading input or from
/// configuring a [`crate::Guesser`].
#[derive(Error, Debug)]
pub enum GuessError {
    /// IO error while reading a document.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A configured charset name is not in the registry.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}

/// Result type alias for charset guessing operations.
pub type Result<T> = std::result::Result<T, GuessError>;
