//! Cuttle rules.
//!
//! - `engine`: the `RulesEngine` trait and the `Engine` that implements it
//! - `legal`: legal-move enumeration for the side holding priority
//!
//! The orchestrator only talks to `RulesEngine`; the operations on `Engine`
//! are public so tests can drive a single step directly.

pub mod engine;
pub mod legal;

pub use engine::{Engine, RulesEngine};
pub use legal::legal_moves;
