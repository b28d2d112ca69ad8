//! Effect definitions.
//!
//! A one-off or permanent play arrives as `(card, mode, targets)`. Parsing it
//! into an effect checks the shape of the request (right number of targets,
//! known mode) before anything looks at the board.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::core::action::{MODE_TWO_COUNTER, MODE_TWO_SCRAP};
use crate::core::error::{PlayKind, ValidationError};

/// A one-off effect, keyed by the rank that produces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OneOff {
    /// Ace: every point card to scrap.
    ScrapPoints,
    /// Two, mode 0: scrap an opponent permanent.
    ScrapPermanent { target: Card },
    /// Two, mode 1: negate the top one-off in flight.
    Counter { target: Card },
    /// Three: take a card from the scrap pile.
    Recover { target: Card },
    /// Four: the opponent discards two cards of their choosing.
    Discard,
    /// Five: draw two.
    DrawTwo,
    /// Six: every permanent to scrap.
    ScrapPermanents,
    /// Seven: play the top card of the pile.
    Reveal,
    /// Nine: return a permanent to its owner's hand.
    Bounce { target: Card },
}

impl OneOff {
    /// Parse a one-off play.
    ///
    /// ```
    /// use cuttle_engine::cards::Card;
    /// use cuttle_engine::effects::OneOff;
    ///
    /// let two: Card = "2C".parse().unwrap();
    /// let queen: Card = "QS".parse().unwrap();
    ///
    /// assert_eq!(
    ///     OneOff::parse(two, 0, &[queen]).unwrap(),
    ///     OneOff::ScrapPermanent { target: queen }
    /// );
    /// ```
    pub fn parse(card: Card, mode: u8, targets: &[Card]) -> Result<Self, ValidationError> {
        let none = || {
            if targets.is_empty() {
                Ok(())
            } else {
                Err(ValidationError::UnexpectedTarget)
            }
        };
        let one = || match targets {
            [] => Err(ValidationError::MissingTarget),
            [target] => Ok(*target),
            _ => Err(ValidationError::Malformed("one-off takes a single target")),
        };

        Ok(match card.rank {
            Rank::Ace => none().map(|_| OneOff::ScrapPoints)?,
            Rank::Two => match mode {
                MODE_TWO_SCRAP => OneOff::ScrapPermanent { target: one()? },
                MODE_TWO_COUNTER => OneOff::Counter { target: one()? },
                other => return Err(ValidationError::InvalidMode(other)),
            },
            Rank::Three => OneOff::Recover { target: one()? },
            Rank::Four => none().map(|_| OneOff::Discard)?,
            Rank::Five => none().map(|_| OneOff::DrawTwo)?,
            Rank::Six => none().map(|_| OneOff::ScrapPermanents)?,
            Rank::Seven => none().map(|_| OneOff::Reveal)?,
            Rank::Nine => OneOff::Bounce { target: one()? },
            Rank::Eight | Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => {
                return Err(ValidationError::Ineligible { card, play: PlayKind::OneOff })
            }
        })
    }

    /// The card this effect points at, if any.
    #[must_use]
    pub fn target(&self) -> Option<Card> {
        match self {
            OneOff::ScrapPermanent { target }
            | OneOff::Counter { target }
            | OneOff::Recover { target }
            | OneOff::Bounce { target } => Some(*target),
            _ => None,
        }
    }
}

/// A permanent entering play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permanent {
    /// Eight: the opponent plays with their hand revealed.
    Glasses,
    /// Jack: take control of an opponent point card.
    Steal { target: Card },
    /// Queen: shields the controller's other cards from targeting.
    Shield,
    /// King: lowers the controller's win threshold.
    Crown,
}

impl Permanent {
    /// Parse a permanent play.
    pub fn parse(card: Card, target: Option<Card>) -> Result<Self, ValidationError> {
        if !card.can_be_permanent() {
            return Err(ValidationError::Ineligible { card, play: PlayKind::Permanent });
        }
        match (card.rank, target) {
            (Rank::Jack, Some(target)) => Ok(Permanent::Steal { target }),
            (Rank::Jack, None) => Err(ValidationError::MissingTarget),
            (_, Some(_)) => Err(ValidationError::UnexpectedTarget),
            (Rank::Eight, None) => Ok(Permanent::Glasses),
            (Rank::Queen, None) => Ok(Permanent::Shield),
            _ => Ok(Permanent::Crown),
        }
    }
}
