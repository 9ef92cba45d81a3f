//! The flat-text card file format: `term :: definition :: errors`.
//!
//! The codec half of this module ([`parse_line`], [`import_lines`],
//! [`export_lines`]) is pure line-sequence logic; [`load`] and [`save`] are
//! the thin filesystem adapters on top, with whole-file overwrite semantics.

use std::fs;
use std::io;
use std::path::Path;

use cram_core::model::{Card, Deck};
use thiserror::Error;

/// Field separator used by the card file format.
pub const FIELD_SEPARATOR: &str = " :: ";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckFileError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The third field of an otherwise well-formed line did not parse as a
    /// non-negative integer.
    #[error("invalid error count {0:?} in card file")]
    InvalidErrorCount(String),
}

/// One line of a card file, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub card: Card,
    pub errors: u32,
}

/// Decode one line of a card file.
///
/// A line that does not split into exactly three fields is not a record; it
/// yields `Ok(None)` and callers skip it.
///
/// # Errors
///
/// Returns `DeckFileError::InvalidErrorCount` when the third field of a
/// well-formed line does not parse as a `u32`.
pub fn parse_line(line: &str) -> Result<Option<CardRecord>, DeckFileError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [term, definition, count] = fields.as_slice() else {
        return Ok(None);
    };
    let errors = count
        .parse::<u32>()
        .map_err(|_| DeckFileError::InvalidErrorCount((*count).to_owned()))?;
    Ok(Some(CardRecord {
        card: Card::new(*term, *definition),
        errors,
    }))
}

/// Import card file lines into a deck, upserting by term.
///
/// Malformed lines are skipped silently; the returned count covers only the
/// lines actually imported.
///
/// # Errors
///
/// Propagates `DeckFileError::InvalidErrorCount`. Records imported before
/// the failing line remain applied.
pub fn import_lines<'a, I>(deck: &mut Deck, lines: I) -> Result<usize, DeckFileError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut imported = 0;
    for line in lines {
        if let Some(record) = parse_line(line)? {
            deck.upsert(record.card, record.errors);
            imported += 1;
        }
    }
    Ok(imported)
}

/// Encode one card as a card file line, without the trailing newline.
#[must_use]
pub fn format_line(card: &Card, errors: u32) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        card.term(),
        card.definition(),
        errors,
        sep = FIELD_SEPARATOR
    )
}

/// Encode a whole deck, one line per card in insertion order.
#[must_use]
pub fn export_lines(deck: &Deck) -> Vec<String> {
    deck.entries()
        .map(|(card, errors)| format_line(card, errors))
        .collect()
}

/// Read a card file into the deck, upserting by term.
///
/// # Errors
///
/// Returns `DeckFileError::Io` if the file cannot be read (a missing file
/// surfaces as `io::ErrorKind::NotFound` with the deck untouched) and
/// `DeckFileError::InvalidErrorCount` for an unparsable count field.
pub fn load(path: impl AsRef<Path>, deck: &mut Deck) -> Result<usize, DeckFileError> {
    let contents = fs::read_to_string(path)?;
    import_lines(deck, contents.lines())
}

/// Write the deck to a card file, replacing any existing content.
///
/// Returns the number of cards written; an empty deck produces an empty
/// file.
///
/// # Errors
///
/// Returns `DeckFileError::Io` if the file cannot be written.
pub fn save(path: impl AsRef<Path>, deck: &Deck) -> Result<usize, DeckFileError> {
    let mut contents = String::new();
    for line in export_lines(deck) {
        contents.push_str(&line);
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(deck.len())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
