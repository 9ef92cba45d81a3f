/// A term/definition pair, the atomic unit of study.
///
/// Identity is structural: two cards are equal exactly when both fields
/// match. Cards are immutable; error counts live on the owning [`Deck`].
///
/// [`Deck`]: crate::model::Deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    term: String,
    definition: String,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }
}
