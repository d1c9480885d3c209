pub const ROUNDS: u64 = 1_000_000;
pub const DECKS: u32 = 8;
pub const UNIT_BET: f64 = 1.0;
pub const BLACKJACK_MULTIPLIER: f64 = 1.5;
pub const DEALER_STAND_TOTAL: u32 = 17;
pub const ROUNDS_PER_REPORT: u64 = 100_000;

/// Low cards (2 through 5) to pull from the shoe before the first round,
/// biasing it toward tens. 0 leaves the shoe untouched.
pub const LOW_CARDS_TO_CULL: usize = 0;

// Dealer stands on all 17s
// Double on any total, any number of cards
// One split per pair; split Aces receive one card and stand
