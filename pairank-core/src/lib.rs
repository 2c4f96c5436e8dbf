/// pairank-core: pairwise preference ranking engine.
///
/// Show two items → record which one was preferred → Elo update → next pair,
/// until the round budget is spent. No IO, no rendering, no timers: the caller
/// displays pairs, collects votes and drives the session.
///
/// Items are identified by caller-provided names. The crate maps them to
/// internal array indices; callers only deal with names.
///
/// # Quick start
///
/// ```rust
/// use pairank_core::{Session, SessionConfig, SessionEvent};
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let items: Vec<String> = ["tea", "coffee", "cocoa"].iter().map(|s| s.to_string()).collect();
/// let config = SessionConfig { total_rounds: 3, ..SessionConfig::default() };
/// let mut session = Session::new(&items, config, SmallRng::seed_from_u64(1)).unwrap();
///
/// let mut event = session.request_initial_pair().unwrap();
/// while let SessionEvent::PairReady { pair, .. } = event {
///     // Ask the user here. This voter always prefers the first item.
///     event = session.vote_and_advance(&pair.first).unwrap();
/// }
///
/// if let SessionEvent::Finished { rankings } = event {
///     for r in &rankings {
///         println!("{}: {:.0}", r.item, r.rating);
///     }
/// }
/// ```

pub mod constants;
pub mod elo;
pub mod error;
pub mod pairing;
pub mod session;
pub mod types;

// Re-export primary public API at crate root.
pub use elo::{expected_outcome, RatingStore, RatingUpdate};
pub use error::{RankError, Result};
pub use pairing::{
    draw_item, exposure_weight, pair_ceiling, unordered_pair_count, ComparisonRecord, Draw,
    PairKey, PairSelector, Selection,
};
pub use session::{Session, SessionConfig, SessionEvent, SessionState, VoteOutcome};
pub use types::{IndexedPair, Pair, RankedItem};
