//! Effect system for one-offs and permanents.
//!
//! - `OneOff` / `Permanent`: what a card does, parsed from `(card, mode, targets)`
//! - `targeting`: checks an effect against the board, including Queen protection
//! - `EffectResolver`: applies a validated effect
//!
//! Validation and application are split so every engine operation can
//! reject a move before anything has changed.

mod effect;
mod resolver;
pub mod targeting;

pub use effect::{OneOff, Permanent};
pub use resolver::{EffectResolver, Resolution};
