//! Card zones.
//!
//! ## Key Types
//!
//! - `Zone`: an unordered set of cards (hand, points, permanents, scrap)
//! - `Pile`: the ordered draw pile, drawn from the top

pub mod zone;

pub use zone::{Pile, Zone};
