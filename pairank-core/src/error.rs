use thiserror::Error;

use crate::session::SessionState;

/// Caller-contract violations reported by the engine.
///
/// None of these are recoverable runtime conditions: they mean the
/// presentation layer sent something the session cannot act on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("need at least 2 items to rank, got {0}")]
    TooFewItems(usize),

    #[error("duplicate item: \"{0}\"")]
    DuplicateItem(String),

    #[error("unknown item: \"{0}\"")]
    UnknownItem(String),

    #[error("an item cannot be compared with itself: \"{0}\"")]
    SelfComparison(String),

    #[error("\"{item}\" is not in the current pair (\"{first}\" vs \"{second}\")")]
    NotInCurrentPair {
        item: String,
        first: String,
        second: String,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("cannot {event} while the session is {state}")]
    UnexpectedEvent {
        event: &'static str,
        state: SessionState,
    },

    #[error("session already finished")]
    Finished,
}

pub type Result<T> = std::result::Result<T, RankError>;
