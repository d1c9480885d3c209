mod basic_strategy;
mod hand;
mod rules;
mod shoe;
mod simulation;
mod statistics;
mod types;

use std::time;

use rand::thread_rng;

use crate::basic_strategy::BasicStrategyChart;
use crate::shoe::{Shoe, ShoeError};
use crate::statistics::SimulationStatistics;
use crate::types::Rank;

fn main() {
    let chart = BasicStrategyChart::new().expect("Couldn't load strategy chart");

    let mut shoe = Shoe::new(rules::DECKS);
    cull_low_cards(&mut shoe, rules::LOW_CARDS_TO_CULL);

    match run_simulation(&mut shoe, &chart, rules::ROUNDS) {
        Ok(stats) => {
            println!("{}", stats.finalize(rules::ROUNDS));
        }
        Err(e) => {
            // Card conservation broke somewhere; nothing to salvage.
            eprintln!("simulation aborted: {}", e);
            std::process::exit(1);
        }
    }
}

/// One round at a time: shuffle, play, record. Rounds are atomic with
/// respect to the shoe, so interrupting between rounds needs no recovery.
fn run_simulation(
    shoe: &mut Shoe,
    chart: &BasicStrategyChart,
    rounds: u64,
) -> Result<SimulationStatistics, ShoeError> {
    let mut stats = SimulationStatistics::default();
    let mut rng = thread_rng();

    let start_time = time::Instant::now();
    for round in 1..=rounds {
        shoe.shuffle(&mut rng);
        let result = simulation::play_round(shoe, chart)?;
        stats.record(&result);

        if round % rules::ROUNDS_PER_REPORT == 0 {
            println!(
                "Played {} of {} rounds, running EV {:+.4}% ({:.0} rounds/sec)",
                round,
                rounds,
                stats.running_ev_percent(),
                round as f64 / start_time.elapsed().as_secs_f64(),
            );
        }
    }

    Ok(stats)
}

/// Pre-conditions the shoe by pulling up to `count` cards of rank 2-5 out
/// of it, bottom-up. Plain draw operations; the cards are simply kept out
/// for the whole run.
fn cull_low_cards(shoe: &mut Shoe, count: usize) {
    let mut removed = 0;
    let mut index = 0;
    while removed < count && index < shoe.len() {
        let low = matches!(
            shoe.cards()[index].rank,
            Rank::Two | Rank::Three | Rank::Four | Rank::Five
        );
        if low {
            shoe.draw_at(index).expect("index is in range");
            removed += 1;
        } else {
            index += 1;
        }
    }
}
