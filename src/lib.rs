//! # cuttle-engine
//!
//! A rules engine for Cuttle, the two-player combat card game.
//!
//! ## Design Principles
//!
//! 1. **Atomic Moves**: every operation validates completely before it
//!    mutates. A rejected move is never partially visible.
//!
//! 2. **Explicit Phases**: a match is awaiting a move, resolving a one-off,
//!    or over. Priority can leave the active side during a one-off and
//!    always returns before the turn ends.
//!
//! 3. **Deterministic**: a seed fixes the whole deal, so a seed plus a move
//!    list replays a match exactly.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: zones are `im` collections, so cloning
//!   a `MatchState` is O(1). Seven follow-ups are played on a clone and
//!   committed only if they succeed.
//!
//! - **Derived Values**: scores, thresholds and hand visibility are
//!   recomputed from the board after every change, never patched by hand.
//!
//! ## Modules
//!
//! - `core`: sides, state, moves, errors, RNG, configuration
//! - `cards`: card identity, eligibility, the deck and the deal
//! - `zones`: hand/points/permanents/scrap sets and the draw pile
//! - `effects`: one-off and permanent effects, targeting, resolution
//! - `stack`: the in-flight one-off and its counters
//! - `rules`: the turn engine and legal-move enumeration
//! - `session`: the match orchestrator, snapshots, and a multi-match registry

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod effects;
pub mod stack;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameRng,
    MatchConfig,
    Move, MoveKind, MoveRecord, MoveRequest,
    EngineError, EngineResult, ValidationError,
    GameResult, MatchState, Phase, PlayerState,
};

pub use crate::cards::{Card, Rank, Suit};

pub use crate::zones::{Pile, Zone};

pub use crate::rules::{Engine, RulesEngine};

pub use crate::effects::{EffectResolver, OneOff, Permanent, Resolution};

pub use crate::stack::{PendingEffect, Stage};

pub use crate::session::{Match, MatchId, MatchRegistry, RegistryError, Snapshot};
