use rand::Rng;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::types::{Card, Rank, Suit};

/// Drawing from an empty shoe means a card went missing somewhere; the
/// simulation cannot continue past it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShoeError {
    #[error("drew from an empty shoe")]
    Empty,
    #[error("draw index {0} out of range")]
    OutOfRange(usize),
}

/// A multi-deck shoe holding an ordered sequence of cards. The top of the
/// shoe is the last position in the sequence.
#[derive(Clone, Debug)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Creates a shoe of `decks` standard 52-card decks, unshuffled.
    pub fn new(decks: u32) -> Shoe {
        let mut cards = Vec::with_capacity(decks as usize * 52);
        for _ in 0..decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards }
    }

    /// Creates a shoe with an explicit card sequence. The last card is the
    /// first one dealt.
    pub fn from_cards(cards: Vec<Card>) -> Shoe {
        Shoe { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Fisher-Yates shuffle, swapping down from the back of the sequence.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let mut current = self.cards.len();
        while current > 1 {
            let swap_with = rng.gen_range(0..current);
            current -= 1;
            self.cards.swap(current, swap_with);
        }
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Empty)
    }

    /// Removes and returns the card at `index`, 0 being the bottom of the
    /// shoe.
    pub fn draw_at(&mut self, index: usize) -> Result<Card, ShoeError> {
        if self.cards.is_empty() {
            return Err(ShoeError::Empty);
        }
        if index >= self.cards.len() {
            return Err(ShoeError::OutOfRange(index));
        }
        Ok(self.cards.remove(index))
    }

    /// Appends cards to the shoe without reshuffling. Reshuffling is the
    /// caller's call, once per round by design.
    pub fn put_back<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }
}
