use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use derive_more::{Add, AddAssign};
use enum_map::EnumMap;

use crate::simulation::RoundResult;
use crate::types::Action;

/// Outcome counters for a set of rounds. Loss amounts keep their negative
/// sign.
#[derive(Default, Clone, Copy, Add, AddAssign)]
pub struct OutcomeTally {
    pub rounds: u64,
    pub ties: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_amount: f64,
    pub loss_amount: f64,
    pub total: f64,
}

impl OutcomeTally {
    fn record(&mut self, outcome: f64) {
        self.rounds += 1;
        self.total += outcome;
        if outcome == 0.0 {
            self.ties += 1;
        } else if outcome > 0.0 {
            self.wins += 1;
            self.win_amount += outcome;
        } else {
            self.losses += 1;
            self.loss_amount += outcome;
        }
    }

    fn summarize(&self, total_rounds: u64) -> TallySummary {
        TallySummary {
            ev_percent: self.total / total_rounds as f64 * 100.0,
            rounds: self.rounds,
            ties: self.ties,
            wins: self.wins,
            losses: self.losses,
            win_rate: ratio(self.wins as f64, (self.wins + self.losses) as f64),
            average_win: ratio(self.win_amount, self.wins as f64),
            average_loss: ratio(self.loss_amount, self.losses as f64),
        }
    }
}

/// Division that reports an explicit undefined instead of NaN when nothing
/// has been counted yet.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Accumulates round outcomes for a whole run, overall and bucketed by the
/// number of hands the round ended with (1 = no split, 2 = split).
#[derive(Default)]
pub struct SimulationStatistics {
    overall: OutcomeTally,
    by_hand_count: BTreeMap<usize, OutcomeTally>,
    actions_taken: EnumMap<Action, u64>,
}

impl SimulationStatistics {
    pub fn record(&mut self, round: &RoundResult) {
        self.overall.record(round.outcome);
        self.by_hand_count
            .entry(round.hands_played)
            .or_default()
            .record(round.outcome);
        for (action, count) in round.actions_taken.iter() {
            self.actions_taken[action] += *count;
        }
    }

    pub fn rounds_recorded(&self) -> u64 {
        self.overall.rounds
    }

    pub fn running_ev_percent(&self) -> f64 {
        match self.overall.rounds {
            0 => 0.0,
            rounds => self.overall.total / rounds as f64 * 100.0,
        }
    }

    /// Derives the final report. Bucket EV percentages divide by the total
    /// round count, so they sum to the overall figure.
    pub fn finalize(&self, total_rounds: u64) -> SimulationReport {
        SimulationReport {
            overall: self.overall.summarize(total_rounds),
            by_hand_count: self
                .by_hand_count
                .iter()
                .map(|(&hands, tally)| (hands, tally.summarize(total_rounds)))
                .collect(),
            actions_taken: self.actions_taken,
        }
    }
}

/// Derived figures for one tally. Ratios whose denominator was zero are
/// None and print as "undefined".
pub struct TallySummary {
    pub ev_percent: f64,
    pub rounds: u64,
    pub ties: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: Option<f64>,
    pub average_win: Option<f64>,
    pub average_loss: Option<f64>,
}

pub struct SimulationReport {
    pub overall: TallySummary,
    pub by_hand_count: BTreeMap<usize, TallySummary>,
    pub actions_taken: EnumMap<Action, u64>,
}

fn fmt_option(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.4}", v),
        None => "undefined".to_string(),
    }
}

impl Display for TallySummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ev {:+.4}% | ties {} | wins {} (rate {}, avg {}) | losses {} (avg {})",
            self.ev_percent,
            self.ties,
            self.wins,
            fmt_option(self.win_rate),
            fmt_option(self.average_win),
            self.losses,
            fmt_option(self.average_loss),
        )
    }
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "overall: {}", self.overall)?;
        for (hands, summary) in &self.by_hand_count {
            writeln!(f, "{} hand(s): {}", hands, summary)?;
        }
        write!(
            f,
            "actions: {} stand, {} hit, {} double, {} split",
            self.actions_taken[Action::Stand],
            self.actions_taken[Action::Hit],
            self.actions_taken[Action::Double],
            self.actions_taken[Action::Split],
        )
    }
}
