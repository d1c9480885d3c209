use std::cmp::Ordering;
use std::collections::VecDeque;

use enum_map::EnumMap;

use crate::basic_strategy::BasicStrategyChart;
use crate::hand;
use crate::hand::Hand;
use crate::rules;
use crate::shoe::{Shoe, ShoeError};
use crate::types::Action;

/// Net result of one simulated round.
pub struct RoundResult {
    /// Sum of the per-hand settlements, in betting units.
    pub outcome: f64,
    /// Player hands at settlement, counting hands created by splits.
    pub hands_played: usize,
    /// How many times each action was taken this round.
    pub actions_taken: EnumMap<Action, u64>,
}

/// Play out one complete round against the given shoe.
///
/// Deals, runs every player hand to completion (splits grow the hand set),
/// plays the dealer, settles each hand, and finally moves every drawn card
/// back into the shoe. The shoe is not reshuffled here; the caller shuffles
/// between rounds.
pub fn play_round(shoe: &mut Shoe, chart: &BasicStrategyChart) -> Result<RoundResult, ShoeError> {
    let mut player_hands: Vec<Hand> = vec![hand![shoe.draw()?, shoe.draw()?]];
    let mut dealer_hand = hand![shoe.draw()?, shoe.draw()?];
    let dealer_up = dealer_hand.cards[0];

    let mut actions_taken: EnumMap<Action, u64> = EnumMap::default();

    // Player turns. Hands enter the queue as splits create them and are
    // processed to exhaustion in creation order.
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(0);
    while let Some(hand_idx) = queue.pop_front() {
        // A dealt blackjack on either side settles this hand with no
        // decisions and no further draws.
        if player_hands[hand_idx].is_blackjack() || dealer_hand.is_blackjack() {
            continue;
        }

        loop {
            let action = chart.decide(&player_hands[hand_idx], dealer_up);
            actions_taken[action] += 1;

            match action {
                Action::Stand => break,
                Action::Hit => {
                    let card = shoe.draw()?;
                    player_hands[hand_idx] += card;
                }
                Action::Double => {
                    player_hands[hand_idx].bet *= 2.0;
                    let card = shoe.draw()?;
                    player_hands[hand_idx] += card;
                    break;
                }
                Action::Split => {
                    // The new hand takes the second card plus a fresh draw;
                    // the original replaces its second card and plays on.
                    let mut split_hand = hand![player_hands[hand_idx].cards[1], shoe.draw()?];
                    split_hand.bet = player_hands[hand_idx].bet;
                    split_hand.from_split = true;

                    player_hands[hand_idx].cards[1] = shoe.draw()?;
                    player_hands[hand_idx].from_split = true;

                    queue.push_back(player_hands.len());
                    player_hands.push(split_hand);
                }
            }

            if player_hands[hand_idx].is_bust() {
                break;
            }
        }
    }

    // Dealer draws to 17, playing out even when every player hand busted.
    while let Some(total) = dealer_hand.best_total() {
        if total >= rules::DEALER_STAND_TOTAL {
            break;
        }
        let card = shoe.draw()?;
        dealer_hand += card;
    }

    let outcome = player_hands
        .iter()
        .map(|hand| settle_hand(hand, &dealer_hand))
        .sum();
    let hands_played = player_hands.len();

    for hand in player_hands {
        shoe.put_back(hand.cards);
    }
    shoe.put_back(dealer_hand.cards);

    Ok(RoundResult {
        outcome,
        hands_played,
        actions_taken,
    })
}

/// Signed settlement for a single player hand against the final dealer
/// hand: positive wins, negative loses, zero pushes.
fn settle_hand(hand: &Hand, dealer_hand: &Hand) -> f64 {
    let player_blackjack = hand.is_blackjack();
    let dealer_blackjack = dealer_hand.is_blackjack();
    if player_blackjack || dealer_blackjack {
        return if player_blackjack && dealer_blackjack {
            0.0
        } else if player_blackjack {
            rules::BLACKJACK_MULTIPLIER * hand.bet
        } else {
            -hand.bet
        };
    }

    // A busted player hand loses before any dealer comparison, so it loses
    // even in a round where the dealer busts too.
    let player_total = match hand.best_total() {
        Some(total) => total,
        None => return -hand.bet,
    };
    let dealer_total = match dealer_hand.best_total() {
        Some(total) => total,
        None => return hand.bet,
    };

    match player_total.cmp(&dealer_total) {
        Ordering::Greater => hand.bet,
        Ordering::Equal => 0.0,
        Ordering::Less => -hand.bet,
    }
}
