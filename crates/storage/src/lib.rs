#![forbid(unsafe_code)]

pub mod deck_file;
pub mod transcript;

pub use deck_file::{CardRecord, DeckFileError};
