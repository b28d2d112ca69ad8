//! Cards and the deck.
//!
//! ## Key Types
//!
//! - `Card`: rank and suit, with the play rules each rank allows
//! - `Rank` / `Suit`: ordered so scuttle comparisons are tuple comparisons
//! - `Deal`: the opening hands and draw pile for a seed

pub mod definition;
pub mod deck;

pub use definition::{can_scuttle, Card, ParseCardError, Rank, Suit};
pub use deck::{deal, Deal, DECK_SIZE};
