//! Error types for the deckdown library.

use std::io;
use thiserror::Error;

/// Result type alias for deckdown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration block could not be parsed. Fatal: no output is
    /// finalized when this is raised.
    #[error("line {line}: invalid configuration block: {message}")]
    ConfigParse {
        /// 1-indexed line number of the opening `---` fence.
        line: usize,
        /// Parser message or offending raw text.
        message: String,
    },

    /// A `---` fence was opened but the document ended before it closed.
    #[error("line {line}: configuration block is never closed")]
    UnclosedConfigBlock {
        /// 1-indexed line number of the opening fence.
        line: usize,
    },

    /// The requested output format has no registered backend.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    /// Error raised by a render backend.
    #[error("rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(err.to_string())
    }
}
