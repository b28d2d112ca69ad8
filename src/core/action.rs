//! Move representation.
//!
//! `Move` is the typed engine input: what is being done and with which
//! cards. `MoveRequest` is the flat wire form a transport hands in
//! (`{side, kind, card, targets, mode}`), converted with `MoveRequest::to_move`.
//!
//! ## Example
//!
//! ```
//! use cuttle_engine::cards::Card;
//! use cuttle_engine::core::{Move, MoveKind, MoveRequest, Side};
//!
//! let ten: Card = "10H".parse().unwrap();
//! let request = MoveRequest::new(Side::First, MoveKind::Point).with_card(ten);
//!
//! assert_eq!(request.to_move().unwrap(), Move::Point(ten));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ValidationError;
use super::player::Side;
use crate::cards::Card;

/// Target list for effects. Most effects take zero or one target; Four
/// discards take two.
pub type Targets = SmallVec<[Card; 2]>;

/// Which way a Two is played.
pub const MODE_TWO_SCRAP: u8 = 0;
/// Two played against the top one-off in flight.
pub const MODE_TWO_COUNTER: u8 = 1;

/// A move submitted by the side holding priority.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Draw the top card of the pile.
    Draw,

    /// Pass without acting.
    Pass,

    /// Play a card from hand for points.
    Point(Card),

    /// Destroy an opponent point card with a higher one from hand.
    Scuttle { attacker: Card, defender: Card },

    /// Play a one-off effect. `mode` matters only for Twos.
    OneOff { card: Card, mode: u8, targets: Targets },

    /// Play an 8, J, Q or K as a permanent. Jacks take a target.
    Permanent { card: Card, target: Option<Card> },

    /// Let the one-off in flight resolve without countering it.
    Resolve,

    /// Choose the cards discarded to a Four.
    Discard { cards: Targets },

    /// Play the card revealed by a Seven. The wrapped move names that card.
    Reveal(Box<Move>),
}

impl Move {
    /// Convenience constructor for one-offs.
    #[must_use]
    pub fn one_off(card: Card, mode: u8, targets: &[Card]) -> Self {
        Move::OneOff {
            card,
            mode,
            targets: SmallVec::from_slice(targets),
        }
    }

    /// The card the move plays from hand (or from the reveal), if any.
    #[must_use]
    pub fn card(&self) -> Option<Card> {
        match self {
            Move::Point(card) => Some(*card),
            Move::Scuttle { attacker, .. } => Some(*attacker),
            Move::OneOff { card, .. } | Move::Permanent { card, .. } => Some(*card),
            Move::Reveal(inner) => inner.card(),
            Move::Draw | Move::Pass | Move::Resolve | Move::Discard { .. } => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let list = |cards: &[Card]| {
            cards
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Move::Draw => write!(f, "draw card"),
            Move::Pass => write!(f, "pass turn"),
            Move::Point(card) => write!(f, "play {card} as point"),
            Move::Scuttle { attacker, defender } => write!(f, "scuttle {defender} with {attacker}"),
            Move::OneOff { card, mode, targets } if targets.is_empty() => {
                write!(f, "play {card} as one-off (mode {mode})")
            }
            Move::OneOff { card, mode, targets } => {
                write!(f, "play {card} as one-off (mode {mode}) on {}", list(targets))
            }
            Move::Permanent { card, target: Some(target) } => {
                write!(f, "play {card} as permanent on {target}")
            }
            Move::Permanent { card, target: None } => write!(f, "play {card} as permanent"),
            Move::Resolve => write!(f, "resolve"),
            Move::Discard { cards } => write!(f, "discard {}", list(cards)),
            Move::Reveal(inner) => write!(f, "from reveal: {inner}"),
        }
    }
}

/// Kind tag used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Draw,
    Pass,
    Point,
    Scuttle,
    OneOff,
    Permanent,
    Resolve,
    Discard,
    Reveal,
}

/// Flat move request as received from a transport.
///
/// For `Reveal`, `mode` picks how the revealed card is played:
/// 0 = points (or scuttle when a target is given), 1 = one-off,
/// 2 = permanent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub side: Side,
    pub kind: MoveKind,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub targets: Vec<Card>,
    #[serde(default)]
    pub mode: Option<u8>,
}

impl MoveRequest {
    #[must_use]
    pub fn new(side: Side, kind: MoveKind) -> Self {
        Self {
            side,
            kind,
            card: None,
            targets: Vec::new(),
            mode: None,
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_targets(mut self, targets: &[Card]) -> Self {
        self.targets = targets.to_vec();
        self
    }

    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Convert to a typed `Move`, checking the request is well formed.
    pub fn to_move(&self) -> Result<Move, ValidationError> {
        let card = || {
            self.card
                .ok_or(ValidationError::Malformed("move needs a card"))
        };
        let single_target = || match self.targets.as_slice() {
            [] => Ok(None),
            [target] => Ok(Some(*target)),
            _ => Err(ValidationError::Malformed("move takes at most one target")),
        };
        let mode = self.mode.unwrap_or(0);

        Ok(match self.kind {
            MoveKind::Draw => Move::Draw,
            MoveKind::Pass => Move::Pass,
            MoveKind::Resolve => Move::Resolve,
            MoveKind::Point => Move::Point(card()?),
            MoveKind::Scuttle => Move::Scuttle {
                attacker: card()?,
                defender: single_target()?.ok_or(ValidationError::MissingTarget)?,
            },
            MoveKind::OneOff => Move::one_off(card()?, mode, &self.targets),
            MoveKind::Permanent => Move::Permanent {
                card: card()?,
                target: single_target()?,
            },
            MoveKind::Discard => Move::Discard {
                cards: SmallVec::from_slice(&self.targets),
            },
            MoveKind::Reveal => {
                let card = card()?;
                let inner = match mode {
                    0 => match single_target()? {
                        Some(defender) => Move::Scuttle { attacker: card, defender },
                        None => Move::Point(card),
                    },
                    1 => Move::one_off(card, MODE_TWO_SCRAP, &self.targets),
                    2 => Move::Permanent { card, target: single_target()? },
                    other => return Err(ValidationError::InvalidMode(other)),
                };
                Move::Reveal(Box::new(inner))
            }
        })
    }
}

/// A committed move with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that made the move.
    pub side: Side,

    /// The move made.
    pub mv: Move,

    /// Turn number when the move was made.
    pub turn: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_request_to_scuttle() {
        let request = MoveRequest::new(Side::First, MoveKind::Scuttle)
            .with_card(card("9S"))
            .with_targets(&[card("9C")]);

        assert_eq!(
            request.to_move().unwrap(),
            Move::Scuttle { attacker: card("9S"), defender: card("9C") }
        );
    }

    #[test]
    fn test_request_missing_card() {
        let request = MoveRequest::new(Side::First, MoveKind::Point);
        assert!(matches!(request.to_move(), Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_request_reveal_modes() {
        let base = MoveRequest::new(Side::Second, MoveKind::Reveal).with_card(card("4H"));

        assert_eq!(
            base.clone().with_mode(0).to_move().unwrap(),
            Move::Reveal(Box::new(Move::Point(card("4H"))))
        );
        assert_eq!(
            base.clone().with_mode(1).to_move().unwrap(),
            Move::Reveal(Box::new(Move::one_off(card("4H"), 0, &[])))
        );
        assert_eq!(
            base.with_mode(7).to_move(),
            Err(ValidationError::InvalidMode(7))
        );
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{"side":"First","kind":"draw"}"#;
        let request: MoveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.to_move().unwrap(), Move::Draw);
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Point(card("7D")).to_string(), "play 7♦ as point");
        assert_eq!(
            Move::Scuttle { attacker: card("9S"), defender: card("9C") }.to_string(),
            "scuttle 9♣ with 9♠"
        );
    }
}
