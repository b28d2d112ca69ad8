//! Target validation.
//!
//! Parsing an effect only checks its shape. These checks hold it against
//! the board: the target must be where the effect expects it, and a Queen
//! on the defending side shields everything but itself from Twos and Jacks.

use crate::cards::Card;
use crate::core::error::{EngineError, EngineResult, ValidationError};
use crate::core::{MatchState, Side};
use crate::stack::Stage;

use super::{OneOff, Permanent};

/// Is `target` shielded by a Queen controlled by `defender`?
#[must_use]
pub fn is_shielded(state: &MatchState, defender: Side, target: Card) -> bool {
    state.player(defender).has_queen_except(target)
}

fn check_shield(state: &MatchState, defender: Side, target: Card) -> EngineResult<()> {
    if is_shielded(state, defender, target) {
        Err(EngineError::QueenProtected { target })
    } else {
        Ok(())
    }
}

fn check_buried(state: &MatchState, target: Card) -> EngineResult<()> {
    if state.is_buried_jack(target) {
        Err(ValidationError::InvalidTarget(target).into())
    } else {
        Ok(())
    }
}

/// Check a one-off played by `side` against the board.
pub fn validate_one_off(state: &MatchState, side: Side, effect: &OneOff) -> EngineResult<()> {
    let opponent = side.opponent();
    match *effect {
        OneOff::ScrapPoints | OneOff::Discard | OneOff::ScrapPermanents => Ok(()),
        OneOff::ScrapPermanent { target } => {
            if !state.player(opponent).permanents.contains(target) {
                return Err(ValidationError::NotOnBoard(target).into());
            }
            check_buried(state, target)?;
            check_shield(state, opponent, target)
        }
        OneOff::Counter { target } => {
            let pending = state
                .pending()
                .filter(|p| p.stage == Stage::Response)
                .ok_or(ValidationError::WrongPhase("nothing is waiting to be countered"))?;
            let (top, top_side) = pending.top();
            if target != top || top_side == side {
                return Err(ValidationError::InvalidTarget(target).into());
            }
            check_shield(state, top_side, target)
        }
        OneOff::Recover { target } => {
            if state.scrap.contains(target) {
                Ok(())
            } else {
                Err(ValidationError::NotInScrap(target).into())
            }
        }
        OneOff::DrawTwo | OneOff::Reveal => {
            if state.pile.is_empty() {
                Err(EngineError::EmptyPile)
            } else {
                Ok(())
            }
        }
        OneOff::Bounce { target } => {
            // Nines ignore Queens.
            if state.permanent_controller(target).is_none() {
                return Err(ValidationError::NotOnBoard(target).into());
            }
            check_buried(state, target)
        }
    }
}

/// Check a permanent played by `side` against the board.
pub fn validate_permanent(state: &MatchState, side: Side, effect: &Permanent) -> EngineResult<()> {
    match *effect {
        Permanent::Steal { target } => {
            let opponent = side.opponent();
            if !state.player(opponent).points.contains(target) {
                return Err(ValidationError::NotInPoints(target).into());
            }
            check_shield(state, opponent, target)
        }
        Permanent::Glasses | Permanent::Shield | Permanent::Crown => Ok(()),
    }
}
