use std::collections::BTreeSet;
use std::ops;

use crate::rules;
use crate::types::{Card, Rank};

/// A Hand of cards belonging to the player or the dealer, with its bet and
/// a flag marking hands created by (or left behind by) a split.
#[derive(PartialEq, Clone, Debug)]
pub struct Hand {
    pub cards: Vec<Card>,
    /// Bet riding on this hand in betting units. Doubles on a Double.
    pub bet: f64,
    pub from_split: bool,
}

#[macro_export]
macro_rules! hand {
    ( $( $x:expr ),* ) => {
        {
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($x);
            )*
            Hand::with_cards(temp_vec)
        }
    };
}

impl Hand {
    pub fn with_cards(cards: Vec<Card>) -> Hand {
        Hand {
            cards,
            bet: rules::UNIT_BET,
            from_split: false,
        }
    }

    /// All achievable totals of this hand that do not bust, ascending and
    /// deduplicated. Empty means bust.
    ///
    /// Every card adds its point value to each partial sum accumulated so
    /// far; Aces fork each sum into a +1 and a +11 candidate. Only at the
    /// end are sums over 21 discarded, which keeps multi-ace hands honest:
    /// three Aces pass through {1,11}, {2,12,22}, {3,13,23,33} and come out
    /// as [3, 13].
    pub fn totals(&self) -> Vec<u32> {
        let mut sums = BTreeSet::from([0u32]);
        for card in &self.cards {
            let mut next = BTreeSet::new();
            for sum in &sums {
                match card.rank {
                    Rank::Ace => {
                        next.insert(sum + 1);
                        next.insert(sum + 11);
                    }
                    rank => {
                        next.insert(sum + rank.point_value());
                    }
                }
            }
            sums = next;
        }
        sums.into_iter().filter(|&total| total <= 21).collect()
    }

    /// Highest non-busting total, or None if the hand busted.
    pub fn best_total(&self) -> Option<u32> {
        self.totals().last().copied()
    }

    pub fn is_bust(&self) -> bool {
        self.totals().is_empty()
    }

    /// A hand is soft while an Ace can still count as either 1 or 11, i.e.
    /// two distinct totals are achievable.
    pub fn is_soft(&self) -> bool {
        self.totals().len() == 2
    }

    /// Exactly two cards making 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.totals().contains(&21)
    }

    /// Checks whether this hand is exactly two equal-rank cards. This does
    /// NOT check whether a split is allowed, only the shape of the hand.
    pub fn is_pair(&self) -> Option<Rank> {
        if self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank {
            Some(self.cards[0].rank)
        } else {
            None
        }
    }
}

impl ops::AddAssign<Card> for Hand {
    fn add_assign(&mut self, rhs: Card) {
        self.cards.push(rhs);
    }
}
