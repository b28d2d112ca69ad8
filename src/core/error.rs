//! Engine errors.
//!
//! Every variant except `Invariant` is recoverable: the move is rejected and
//! the match is left exactly as it was.

use thiserror::Error;

use super::player::Side;
use crate::cards::Card;

/// How a card was asked to be played, for eligibility errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayKind {
    Point,
    OneOff,
    Permanent,
}

impl std::fmt::Display for PlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayKind::Point => write!(f, "a point card"),
            PlayKind::OneOff => write!(f, "a one-off"),
            PlayKind::Permanent => write!(f, "a permanent"),
        }
    }
}

/// A move that is malformed or does not fit the current board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is not in hand")]
    NotInHand(Card),

    #[error("{0} is not in the opponent's points")]
    NotInPoints(Card),

    #[error("{0} is not a permanent in play")]
    NotOnBoard(Card),

    #[error("{0} is not in the scrap pile")]
    NotInScrap(Card),

    #[error("{card} cannot be played as {play}")]
    Ineligible { card: Card, play: PlayKind },

    #[error("{attacker} cannot scuttle {defender}")]
    IllegalScuttle { attacker: Card, defender: Card },

    #[error("move is missing a target")]
    MissingTarget,

    #[error("move takes no target")]
    UnexpectedTarget,

    #[error("{0} is not a legal target")]
    InvalidTarget(Card),

    #[error("mode {0} is not valid for this card")]
    InvalidMode(u8),

    #[error("move is not allowed while {0}")]
    WrongPhase(&'static str),

    #[error("malformed move: {0}")]
    Malformed(&'static str),
}

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{target} is protected by a Queen")]
    QueenProtected { target: Card },

    /// Raised for the side without priority, and for any move once the
    /// match is over.
    #[error("{side} does not hold priority")]
    IllegalPriority { side: Side },

    #[error("the draw pile is empty")]
    EmptyPile,

    /// Fatal: the match was aborted.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl EngineError {
    /// True for errors that end the match.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Invariant(_))
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
