use std::fmt;

use strum_macros::EnumIter;

/// The 13 card ranks. Suits never affect value, but ranks stay symbolic so
/// that e.g. a Jack-Queen twenty is not mistaken for a pair.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, EnumIter)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Counting value of this rank: face cards count 10, Aces count 1. The
    /// soft-ace 11 is handled by the hand evaluator. This is also the dealer
    /// up-card value used for strategy chart lookups.
    pub fn point_value(self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 1,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{}", s)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, EnumIter)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♡",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        };
        write!(f, "{}", s)
    }
}

/// A single physical card. Immutable once created.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, enum_map::Enum)]
pub enum Action {
    Stand,
    Hit,
    Double,
    Split,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum HandType {
    Hard,
    Soft,
    Pair,
}
