mod card;
mod deck;

pub use card::Card;
pub use deck::{Deck, DeckError, HardestCards};
