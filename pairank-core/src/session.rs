/// Session controller.
///
/// Owns the rating store, the pair selector and the random source, and walks
/// the vote cycle: pair ready → vote → update → next pair or finish.
/// No IO and no timers: the presentation layer drives every transition and
/// decides how long to linger between a vote and the next pair.
use std::fmt;

use rand::Rng;

use crate::constants::{
    DEFAULT_BASELINE_RATING, DEFAULT_K_FACTOR, DEFAULT_TOTAL_ROUNDS, MAX_PAIR_ATTEMPTS,
};
use crate::elo::{RatingStore, RatingUpdate};
use crate::error::{RankError, Result};
use crate::pairing::{pair_ceiling, PairSelector};
use crate::types::{IndexedPair, Pair, RankedItem};

/// Session parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Votes to collect before finishing.
    pub total_rounds: usize,
    pub k_factor: f64,
    pub baseline_rating: f64,
    /// Redraw budget per pair before a repeated pair is accepted.
    pub max_pair_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            k_factor: DEFAULT_K_FACTOR,
            baseline_rating: DEFAULT_BASELINE_RATING,
            max_pair_attempts: MAX_PAIR_ATTEMPTS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(RankError::InvalidConfig(format!(
                "k_factor must be a positive number, got {}",
                self.k_factor
            )));
        }
        if !self.baseline_rating.is_finite() {
            return Err(RankError::InvalidConfig(format!(
                "baseline_rating must be finite, got {}",
                self.baseline_rating
            )));
        }
        if self.max_pair_attempts == 0 {
            return Err(RankError::InvalidConfig("max_pair_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no pair requested yet.
    NotStarted,
    /// A pair is on display.
    AwaitingVote,
    /// A vote was applied; votes are dropped until `advance()`.
    Processing,
    /// Terminal.
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::NotStarted => "not started",
            SessionState::AwaitingVote => "awaiting a vote",
            SessionState::Processing => "processing a vote",
            SessionState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// What the presentation layer should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Show `pair`. `round` is the 0-based index of the vote being asked for.
    PairReady {
        pair: Pair,
        round: usize,
        total_rounds: usize,
    },
    /// The session is over. Emitted exactly once per session.
    Finished { rankings: Vec<RankedItem> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    Recorded(RatingUpdate),
    /// Arrived while an earlier vote was still processing; dropped.
    Ignored,
}

pub struct Session<R> {
    store: RatingStore,
    selector: PairSelector,
    config: SessionConfig,
    rng: R,
    state: SessionState,
    round: usize,
    current_pair: Option<IndexedPair>,
}

impl<R: Rng> Session<R> {
    pub fn new(items: &[String], config: SessionConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let store = RatingStore::new(items, config.baseline_rating, config.k_factor)?;
        let selector = PairSelector::new(config.max_pair_attempts);

        Ok(Session {
            store,
            selector,
            config,
            rng,
            state: SessionState::NotStarted,
            round: 0,
            current_pair: None,
        })
    }

    /// Start the session. Finishes immediately if `total_rounds` is 0.
    pub fn request_initial_pair(&mut self) -> Result<SessionEvent> {
        match self.state {
            SessionState::NotStarted => Ok(self.next_event()),
            SessionState::Finished => Err(RankError::Finished),
            state => Err(RankError::UnexpectedEvent { event: "request the initial pair", state }),
        }
    }

    /// Apply a vote for `chosen`, which must be one of the displayed items.
    ///
    /// The session then stays in `Processing` until `advance()`, and any vote
    /// arriving in between is ignored rather than queued.
    pub fn submit_vote(&mut self, chosen: &str) -> Result<VoteOutcome> {
        let (a, b) = match self.state {
            SessionState::AwaitingVote => match self.current_pair {
                Some(pair) => pair,
                None => {
                    return Err(RankError::UnexpectedEvent { event: "submit a vote", state: self.state })
                }
            },
            SessionState::Processing => {
                tracing::debug!(round = self.round, chosen, "vote ignored while processing");
                return Ok(VoteOutcome::Ignored);
            }
            SessionState::Finished => return Err(RankError::Finished),
            state => return Err(RankError::UnexpectedEvent { event: "submit a vote", state }),
        };

        let index = self.store.index();
        let (winner, loser) = if index.to_name(a) == chosen {
            (a, b)
        } else if index.to_name(b) == chosen {
            (b, a)
        } else {
            return Err(RankError::NotInCurrentPair {
                item: chosen.to_string(),
                first: index.to_name(a).to_string(),
                second: index.to_name(b).to_string(),
            });
        };

        self.state = SessionState::Processing;
        let update = self.store.apply_result_indexed(winner, loser);
        self.round += 1;

        Ok(VoteOutcome::Recorded(update))
    }

    /// Finish processing the last vote: show the next pair or end the session.
    pub fn advance(&mut self) -> Result<SessionEvent> {
        match self.state {
            SessionState::Processing => Ok(self.next_event()),
            SessionState::Finished => Err(RankError::Finished),
            state => Err(RankError::UnexpectedEvent { event: "advance", state }),
        }
    }

    /// `submit_vote` followed by `advance`, for renderers with no transition delay.
    pub fn vote_and_advance(&mut self, chosen: &str) -> Result<SessionEvent> {
        self.submit_vote(chosen)?;
        self.advance()
    }

    /// End the session now, from any state except `Finished`.
    pub fn request_end(&mut self) -> Result<SessionEvent> {
        if self.state == SessionState::Finished {
            return Err(RankError::Finished);
        }
        Ok(self.finish())
    }

    fn should_stop(&self) -> bool {
        self.round >= self.config.total_rounds
            || self.selector.distinct_pairs() >= pair_ceiling(self.store.num_items())
    }

    fn next_event(&mut self) -> SessionEvent {
        if self.should_stop() {
            return self.finish();
        }

        let selection = self.selector.select(&mut self.store, &mut self.rng);
        self.current_pair = Some(selection.pair);
        self.state = SessionState::AwaitingVote;

        let pair = self.store.index().to_pair(selection.pair);
        tracing::debug!(
            round = self.round,
            attempts = selection.attempts,
            first = pair.first.as_str(),
            second = pair.second.as_str(),
            "pair ready"
        );

        SessionEvent::PairReady {
            pair,
            round: self.round,
            total_rounds: self.config.total_rounds,
        }
    }

    fn finish(&mut self) -> SessionEvent {
        self.state = SessionState::Finished;
        self.current_pair = None;

        let rankings = self.store.snapshot();
        tracing::info!(
            rounds = self.round,
            distinct_pairs = self.selector.distinct_pairs(),
            "session finished"
        );

        SessionEvent::Finished { rankings }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Votes applied so far.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn total_rounds(&self) -> usize {
        self.config.total_rounds
    }

    /// The pair on display, if a vote is being awaited or processed.
    pub fn current_pair(&self) -> Option<Pair> {
        self.current_pair.map(|p| self.store.index().to_pair(p))
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn selector(&self) -> &PairSelector {
        &self.selector
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
