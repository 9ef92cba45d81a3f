//! Quiz planning and answer grading.

use cram_core::model::{Card, Deck};

/// The questions one `ask` run will pose, in order.
///
/// The plan stores a single pass over the deck; [`QuizPlan::questions`]
/// replays it `full_rounds` times and then yields the first `extra` cards
/// once more. The requested total never inflates the allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub round: Vec<Card>,
    pub full_rounds: usize,
    pub extra: usize,
}

impl QuizPlan {
    /// Plan `total` questions over the deck: whole passes in insertion
    /// order, then the first `total % len` cards once more. An empty deck
    /// yields an empty plan whatever the requested total.
    #[must_use]
    pub fn build(deck: &Deck, total: usize) -> Self {
        let round: Vec<Card> = deck.cards().cloned().collect();
        if round.is_empty() {
            return Self {
                round,
                full_rounds: 0,
                extra: 0,
            };
        }

        Self {
            full_rounds: total / round.len(),
            extra: total % round.len(),
            round,
        }
    }

    /// The planned questions in order, one pass after another.
    pub fn questions(&self) -> impl Iterator<Item = &Card> {
        (0..self.full_rounds)
            .flat_map(|_| self.round.iter())
            .chain(self.round.iter().take(self.extra))
    }

    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.round.len() * self.full_rounds + self.extra
    }

    /// Returns true when the plan has no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_rounds == 0 && self.extra == 0
    }
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
    /// Wrong for the asked card, but it is the definition of another card;
    /// `term` names that card.
    Confused { term: String },
}

/// Grade an answer against the asked card.
///
/// The confusion check consults the deck as it stands now, not as it was
/// when the plan was built, and takes the first matching definition in
/// insertion order.
#[must_use]
pub fn grade_answer(deck: &Deck, card: &Card, answer: &str) -> Verdict {
    if answer == card.definition() {
        return Verdict::Correct;
    }
    match deck.find_by_definition(answer) {
        Some(other) => Verdict::Confused {
            term: other.term().to_owned(),
        },
        None => Verdict::Wrong,
    }
}
