use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::hand::Hand;
use crate::types::*;

static BS_TABLE_CSV_S17_DANY: &'static [u8] = include_bytes!("charts/bs_s17_dany.csv");

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
struct ChartKey {
    hand_type: HandType,
    /// Total for hard and soft hands (the higher total for soft), the
    /// paired card's point value for pair hands.
    hand_number: u32,
    /// Dealer up-card value: 10 for any ten-valued card, 1 for an Ace.
    upcard: u32,
}

/// The fixed basic-strategy policy, loaded from the embedded chart so each
/// cell can be checked against a published chart.
#[derive(Clone)]
pub struct BasicStrategyChart {
    chart: HashMap<ChartKey, Action>,
}

impl BasicStrategyChart {
    pub fn new() -> Result<BasicStrategyChart, Box<dyn Error>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(BS_TABLE_CSV_S17_DANY);

        let mut chart = HashMap::new();

        // Reading the file.
        let mut current_hand_type = HandType::Hard;
        let mut current_headers: Vec<u32> = vec![];
        for line in reader.records() {
            let record = line?;
            let first_col = record.get(0).unwrap();

            match HandType::from_str(first_col) {
                // If this record is a header, store the header values.
                Ok(header) => {
                    current_hand_type = header;
                    current_headers.clear();
                    for field in record.iter().skip(1) {
                        current_headers.push(csv_rank_to_value(field).unwrap());
                    }
                    continue;
                }
                // If this record is not a header, fill in the chart row.
                Err(_) => {
                    let hand_number = csv_hand_num_to_value(first_col, current_hand_type).unwrap();
                    for (idx, action) in record.iter().skip(1).enumerate() {
                        let k = ChartKey {
                            hand_type: current_hand_type,
                            hand_number,
                            upcard: current_headers[idx],
                        };
                        chart.insert(k, csv_action_parse(action));
                    }
                }
            }
        }

        Ok(BasicStrategyChart { chart })
    }

    /// Determine the play for `hand` against the dealer's up-card.
    ///
    /// Must not be called on a busted hand; the round engine resolves busts
    /// before asking for a decision.
    pub fn decide(&self, hand: &Hand, dealer_up: Card) -> Action {
        // A hand split off Aces receives its one mandatory card and stands.
        if hand.from_split && hand.cards[0].rank == Rank::Ace {
            return Action::Stand;
        }

        let upcard = dealer_up.rank.point_value();
        let key = if let (Some(rank), false) = (hand.is_pair(), hand.from_split) {
            ChartKey {
                hand_type: HandType::Pair,
                hand_number: rank.point_value(),
                upcard,
            }
        } else {
            let totals = hand.totals();
            match totals.as_slice() {
                [hard] => ChartKey {
                    hand_type: HandType::Hard,
                    hand_number: *hard,
                    upcard,
                },
                [_, high] => ChartKey {
                    hand_type: HandType::Soft,
                    hand_number: *high,
                    upcard,
                },
                _ => panic!("Strategy queried on a busted hand: {:?}", hand),
            }
        };

        match self.chart.get(&key) {
            Some(action) => *action,
            None => panic!("No action found for the hand: {:?} vs {}", hand, dealer_up),
        }
    }
}

impl Display for BasicStrategyChart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let header = "2 3 4 5 6 7 8 9 10 A";
        let header_values = [2, 3, 4, 5, 6, 7, 8, 9, 10, 1];

        writeln!(f, "Hard {}", header)?;
        for hard_total in 4..=21 {
            write!(f, "{:<4}", hard_total)?;
            for &upcard in &header_values {
                let key = ChartKey { hand_type: HandType::Hard, hand_number: hard_total, upcard };
                write!(f, " {}", to_letter(self.chart[&key]))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Soft {}", header)?;
        for soft_total in 13..=21 {
            write!(f, "{:<4}", soft_total)?;
            for &upcard in &header_values {
                let key = ChartKey { hand_type: HandType::Soft, hand_number: soft_total, upcard };
                write!(f, " {}", to_letter(self.chart[&key]))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Pair {}", header)?;
        for paired_value in [2, 3, 4, 5, 6, 7, 8, 9, 10, 1] {
            write!(f, "{:<4}", value_to_rank_str(paired_value))?;
            for &upcard in &header_values {
                let key = ChartKey { hand_type: HandType::Pair, hand_number: paired_value, upcard };
                write!(f, " {}", to_letter(self.chart[&key]))?;
            }
            writeln!(f)?;
        }

        writeln!(f)
    }
}

impl FromStr for HandType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hard" => Ok(HandType::Hard),
            "Soft" => Ok(HandType::Soft),
            "Pair" => Ok(HandType::Pair),
            _ => Err(()),
        }
    }
}

/// Convert up-card labels from the CSV headers (along the top); A is 1.
fn csv_rank_to_value(rank_str: &str) -> Option<u32> {
    match rank_str {
        "A" => Some(1),
        _ => match rank_str.parse() {
            Ok(v @ 2..=10) => Some(v),
            _ => None,
        },
    }
}

fn value_to_rank_str(value: u32) -> String {
    match value {
        1 => "A".to_string(),
        v => v.to_string(),
    }
}

/// Convert row labels from the CSV (left side): totals for Hard/Soft rows,
/// rank labels for Pair rows.
fn csv_hand_num_to_value(label: &str, hand_type: HandType) -> Option<u32> {
    match hand_type {
        HandType::Pair => csv_rank_to_value(label),
        _ => label.parse().ok(),
    }
}

fn csv_action_parse(csv_data: &str) -> Action {
    match csv_data {
        "S" => Action::Stand,
        "H" => Action::Hit,
        "D" => Action::Double,
        "P" => Action::Split,
        unknown => panic!("Unknown action string {}", unknown),
    }
}

fn to_letter(action: Action) -> &'static str {
    match action {
        Action::Stand => "S",
        Action::Hit => "H",
        Action::Double => "D",
        Action::Split => "P",
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::hand;
    use crate::hand::Hand;
    use crate::types::Rank::*;
    use crate::types::{Action, Card, Rank, Suit};

    use super::*;

    fn c(rank: Rank) -> Card {
        Card::new(rank, Suit::Hearts)
    }

    fn up(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    fn split_hand(first: Rank, second: Rank) -> Hand {
        let mut hand = hand![c(first), c(second)];
        hand.from_split = true;
        hand
    }

    #[test]
    fn chart_covers_its_whole_domain() {
        let chart = BasicStrategyChart::new().expect("Couldn't load strategy chart");
        for upcard in [1, 2, 3, 4, 5, 6, 7, 8, 9, 10] {
            for hard in 4..=21 {
                let key = ChartKey { hand_type: HandType::Hard, hand_number: hard, upcard };
                assert!(chart.chart.contains_key(&key), "missing Hard {} vs {}", hard, upcard);
            }
            for soft in 13..=21 {
                let key = ChartKey { hand_type: HandType::Soft, hand_number: soft, upcard };
                assert!(chart.chart.contains_key(&key), "missing Soft {} vs {}", soft, upcard);
            }
            for paired in [1, 2, 3, 4, 5, 6, 7, 8, 9, 10] {
                let key = ChartKey { hand_type: HandType::Pair, hand_number: paired, upcard };
                assert!(chart.chart.contains_key(&key), "missing Pair {} vs {}", paired, upcard);
            }
        }
    }

    #[test]
    fn hard_hand_plays() {
        let chart = BasicStrategyChart::new().unwrap();

        println!("{}", chart);

        assert_eq!(chart.decide(&hand![c(Eight), c(Five)], up(Four)), Action::Stand);
        assert_eq!(chart.decide(&hand![c(Eight), c(Five)], up(Eight)), Action::Hit);
        // Doubling carries no card-count restriction under this policy.
        assert_eq!(chart.decide(&hand![c(Five), c(Three), c(Two)], up(Eight)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Ten), c(Two)], up(Five)), Action::Stand);
        assert_eq!(chart.decide(&hand![c(Ten), c(Two)], up(Seven)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Six), c(Three)], up(Six)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Six), c(Three)], up(Seven)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Seven), c(Four)], up(Ace)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Four), c(Four), c(Three), c(Ten)], up(Ten)), Action::Stand);
    }

    #[test]
    fn soft_hand_plays() {
        let chart = BasicStrategyChart::new().unwrap();

        assert_eq!(chart.decide(&hand![c(Ace), c(Two)], up(Five)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Ace), c(Two)], up(Four)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Ace), c(Five)], up(Four)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Ace), c(Six)], up(Three)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Ace), c(Six)], up(Two)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Ace), c(Seven)], up(Three)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Ace), c(Seven)], up(Seven)), Action::Stand);
        assert_eq!(chart.decide(&hand![c(Ace), c(Seven)], up(Nine)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Ace), c(Eight)], up(Six)), Action::Stand);
        // Multi-card soft hands key on the higher total too.
        assert_eq!(chart.decide(&hand![c(Ace), c(Three), c(Three)], up(Two)), Action::Hit);
    }

    #[test]
    fn pair_plays() {
        let chart = BasicStrategyChart::new().unwrap();

        for upcard in Rank::iter() {
            assert_eq!(chart.decide(&hand![c(Ace), c(Ace)], up(upcard)), Action::Split);
            assert_eq!(chart.decide(&hand![c(Eight), c(Eight)], up(upcard)), Action::Split);
        }
        assert_eq!(chart.decide(&hand![c(Nine), c(Nine)], up(Seven)), Action::Stand);
        assert_eq!(chart.decide(&hand![c(Nine), c(Nine)], up(Eight)), Action::Split);
        assert_eq!(chart.decide(&hand![c(Seven), c(Seven)], up(Nine)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Six), c(Six)], up(Eight)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Six), c(Six)], up(Five)), Action::Split);
        assert_eq!(chart.decide(&hand![c(Four), c(Four)], up(Five)), Action::Split);
        assert_eq!(chart.decide(&hand![c(Four), c(Four)], up(Seven)), Action::Hit);
        assert_eq!(chart.decide(&hand![c(Two), c(Two)], up(Seven)), Action::Split);
        assert_eq!(chart.decide(&hand![c(Two), c(Two)], up(Eight)), Action::Hit);
        // Ten- and five-pairs play as their hard totals.
        assert_eq!(chart.decide(&hand![c(King), c(King)], up(Six)), Action::Stand);
        assert_eq!(chart.decide(&hand![c(Five), c(Five)], up(Eight)), Action::Double);
        assert_eq!(chart.decide(&hand![c(Five), c(Five)], up(Ten)), Action::Hit);
        // Unequal ranks of equal value are not a pair.
        assert_eq!(chart.decide(&hand![c(King), c(Queen)], up(Six)), Action::Stand);
    }

    #[test]
    fn split_hands_cannot_resplit() {
        let chart = BasicStrategyChart::new().unwrap();

        // A re-paired split hand plays as its hard total.
        assert_eq!(chart.decide(&split_hand(Eight, Eight), up(Five)), Action::Stand);
        assert_eq!(chart.decide(&split_hand(Two, Two), up(Five)), Action::Hit);
        assert_eq!(chart.decide(&split_hand(Ten, Ten), up(Five)), Action::Stand);
    }

    #[test]
    fn split_aces_always_stand() {
        let chart = BasicStrategyChart::new().unwrap();

        for drawn in Rank::iter() {
            for upcard in Rank::iter() {
                assert_eq!(chart.decide(&split_hand(Ace, drawn), up(upcard)), Action::Stand);
            }
        }
    }
}
