//! The one-off stack.
//!
//! A one-off does not resolve the moment it is played. It goes on the stack
//! and priority passes to the opponent, who may answer with a Two (a
//! counter) or let it resolve. Counters stack on top of each other; each
//! one flips whether the base effect goes off.
//!
//! Some effects need a second input before they finish:
//! - Four waits for the opponent to choose discards
//! - Seven waits for its controller to choose how to play the revealed card
//!
//! ## Example
//!
//! ```
//! use cuttle_engine::cards::Card;
//! use cuttle_engine::core::Side;
//! use cuttle_engine::effects::OneOff;
//! use cuttle_engine::stack::PendingEffect;
//!
//! let ace: Card = "AH".parse().unwrap();
//! let two: Card = "2S".parse().unwrap();
//!
//! let mut pending = PendingEffect::new(ace, OneOff::ScrapPoints, Side::First);
//! assert_eq!(pending.responder(), Side::Second);
//!
//! pending.push_counter(two, Side::Second);
//! assert!(pending.is_negated());
//! assert_eq!(pending.top(), (two, Side::Second));
//! assert_eq!(pending.responder(), Side::First);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::Side;
use crate::effects::OneOff;

/// Where an in-flight effect is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The side without the top card may counter or let it resolve.
    Response,
    /// A Four resolved; its target must pick discards.
    Discard,
    /// A Seven resolved; its controller must play the revealed card.
    Reveal(Card),
}

/// A counter played on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counter {
    pub card: Card,
    pub side: Side,
}

/// A one-off in flight.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingEffect {
    /// The card that produced the effect.
    pub card: Card,

    /// The parsed effect.
    pub effect: OneOff,

    /// Who played it.
    pub controller: Side,

    /// Counters, bottom to top.
    pub counters: SmallVec<[Counter; 2]>,

    /// Current stage.
    pub stage: Stage,
}

impl PendingEffect {
    #[must_use]
    pub fn new(card: Card, effect: OneOff, controller: Side) -> Self {
        Self {
            card,
            effect,
            controller,
            counters: SmallVec::new(),
            stage: Stage::Response,
        }
    }

    /// Top card of the stack and the side that played it.
    #[must_use]
    pub fn top(&self) -> (Card, Side) {
        self.counters
            .last()
            .map_or((self.card, self.controller), |c| (c.card, c.side))
    }

    /// The side entitled to answer the top card.
    #[must_use]
    pub fn responder(&self) -> Side {
        self.top().1.opponent()
    }

    /// Put a counter on top.
    pub fn push_counter(&mut self, card: Card, side: Side) {
        self.counters.push(Counter { card, side });
    }

    /// An odd number of counters cancels the base effect.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.counters.len() % 2 == 1
    }

    /// Every card held by the stack, including a revealed card.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        let revealed = match self.stage {
            Stage::Reveal(card) => Some(card),
            _ => None,
        };
        std::iter::once(self.card)
            .chain(self.counters.iter().map(|c| c.card))
            .chain(revealed)
    }
}
