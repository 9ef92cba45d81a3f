//! Shared error types for the services crate.

use thiserror::Error;

use storage::deck_file::DeckFileError;

use crate::console::ConsoleError;

/// Errors that end a session.
///
/// Everything a user can get wrong interactively (duplicates, unknown
/// terms, a missing import file) is reported through the sink and never
/// surfaces here; these variants are the fatal paths the binary reports on
/// stderr.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error(transparent)]
    DeckFile(#[from] DeckFileError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The answer to `How many times to ask?` was not a non-negative
    /// integer.
    #[error("invalid count {0:?}")]
    InvalidCount(String),
}
