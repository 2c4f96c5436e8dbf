/// Rating every item starts the session with.
/// Only differences between ratings matter, so the value is arbitrary; 1000 keeps
/// the numbers readable after a few dozen comparisons.
pub const DEFAULT_BASELINE_RATING: f64 = 1000.0;

/// Maximum rating points exchanged by a single comparison.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Number of comparisons a session asks for before finishing on its own.
pub const DEFAULT_TOTAL_ROUNDS: usize = 30;

/// How many times the pair selector redraws while it keeps landing on a pair
/// that was already shown. After this many attempts the last draw is accepted
/// even if it repeats.
///
/// Small item lists run out of fresh pairs quickly (10 items have 45), and a
/// session is short, so a repeat is cheaper than an unbounded loop.
pub const MAX_PAIR_ATTEMPTS: usize = 30;

/// Rating difference at which the stronger item is expected to win 10:1.
pub const ELO_SCALE: f64 = 400.0;
