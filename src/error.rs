use thiserror::Error;

use crate::{chips::Chips, game::Phase};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("wager of {wager} exceeds the remaining stack of {stack}")]
    InsufficientFunds { wager: Chips, stack: Chips },

    /// Drawing from an exhausted deck. Dealing limits make this unreachable,
    /// so seeing it means the round logic is broken.
    #[error("deck is empty")]
    EmptyDeck,

    #[error("hand already holds five cards")]
    HandFull,

    #[error("hand of {low}/{high} cannot stand, the minimum is 16")]
    IllegalStand { low: u8, high: u8 },

    #[error("action needs phase {expected:?} but the round is in {actual:?}")]
    OutOfPhase { expected: Phase, actual: Phase },

    #[error("no round has been dealt")]
    NoRound,

    #[error("the current round has not been settled")]
    RoundInProgress,

    #[error("a stack is exhausted, start a new game")]
    SessionOver,

    #[error("strategy must stand on a value between 16 and 21, got {0}")]
    InvalidStrategy(u8),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
