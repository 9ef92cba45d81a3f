use thiserror::Error;

use crate::model::card::Card;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("a card with term {0:?} already exists")]
    DuplicateTerm(String),

    #[error("a card with definition {0:?} already exists")]
    DuplicateDefinition(String),

    #[error("no card with term {0:?}")]
    UnknownTerm(String),
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
struct CardEntry {
    card: Card,
    errors: u32,
}

/// The highest error count in a deck and the terms sharing it.
///
/// `terms` is empty whenever `errors` is 0: a card that was never answered
/// wrong is not "hardest", no matter how many such cards exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardestCards {
    pub errors: u32,
    pub terms: Vec<String>,
}

/// An insertion-ordered collection of cards with per-card error counts.
///
/// Terms and definitions are each unique across the deck. [`Deck::add`]
/// rejects offenders; [`Deck::upsert`] (the import path) replaces by term
/// and trusts the rest. Iteration order is insertion order and drives quiz
/// rounds as well as export ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<CardEntry>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a card with a zero error count.
    ///
    /// The term is checked before the definition, so when both fields
    /// collide with existing cards the reported error names the term.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::DuplicateTerm` or `DeckError::DuplicateDefinition`
    /// if either field is already taken; the deck is left unchanged.
    pub fn add(&mut self, card: Card) -> Result<(), DeckError> {
        if self.find_by_term(card.term()).is_some() {
            return Err(DeckError::DuplicateTerm(card.term().to_owned()));
        }
        if self.find_by_definition(card.definition()).is_some() {
            return Err(DeckError::DuplicateDefinition(card.definition().to_owned()));
        }
        self.entries.push(CardEntry { card, errors: 0 });
        Ok(())
    }

    /// Remove and return the card with the given term.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownTerm` if no card has that term.
    pub fn remove(&mut self, term: &str) -> Result<Card, DeckError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.card.term() == term)
            .ok_or_else(|| DeckError::UnknownTerm(term.to_owned()))?;
        Ok(self.entries.remove(index).card)
    }

    /// Insert a card with an explicit error count, replacing any card that
    /// already holds the same term.
    ///
    /// This is the import path: it bypasses the duplicate-definition check
    /// and moves a replaced term to the end of the iteration order.
    pub fn upsert(&mut self, card: Card, errors: u32) {
        self.entries.retain(|entry| entry.card.term() != card.term());
        self.entries.push(CardEntry { card, errors });
    }

    /// First card, in insertion order, whose term matches.
    #[must_use]
    pub fn find_by_term(&self, term: &str) -> Option<&Card> {
        self.cards().find(|card| card.term() == term)
    }

    /// First card, in insertion order, whose definition matches.
    #[must_use]
    pub fn find_by_definition(&self, definition: &str) -> Option<&Card> {
        self.cards().find(|card| card.definition() == definition)
    }

    /// Count one more wrong answer against the card with the given term.
    ///
    /// Unknown terms are ignored: the quiz only asks cards the deck owns,
    /// and deck membership cannot change while a quiz runs. The count
    /// saturates at `u32::MAX`, which an imported card can already carry.
    pub fn record_error(&mut self, term: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.card.term() == term)
        {
            entry.errors = entry.errors.saturating_add(1);
        }
    }

    /// Error count for the card with the given term.
    #[must_use]
    pub fn error_count(&self, term: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.card.term() == term)
            .map(|entry| entry.errors)
    }

    /// Set every error count back to zero.
    pub fn reset_stats(&mut self) {
        for entry in &mut self.entries {
            entry.errors = 0;
        }
    }

    /// The highest error count and every term that shares it.
    #[must_use]
    pub fn hardest(&self) -> HardestCards {
        let errors = self
            .entries
            .iter()
            .map(|entry| entry.errors)
            .max()
            .unwrap_or(0);
        let terms = if errors == 0 {
            Vec::new()
        } else {
            self.entries
                .iter()
                .filter(|entry| entry.errors == errors)
                .map(|entry| entry.card.term().to_owned())
                .collect()
        };
        HardestCards { errors, terms }
    }

    /// Cards with their error counts, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&Card, u32)> {
        self.entries.iter().map(|entry| (&entry.card, entry.errors))
    }

    /// Cards in insertion order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.entries.iter().map(|entry| &entry.card)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
