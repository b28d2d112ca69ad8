//! Core match types: sides, state, moves, errors, RNG, configuration.
//!
//! Everything the engine reads or writes lives here. The rules themselves
//! are in `rules`; this module only knows how a match is laid out.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use player::{Side, SideMap};
pub use rng::GameRng;
pub use config::MatchConfig;
pub use action::{Move, MoveKind, MoveRecord, MoveRequest};
pub use error::{EngineError, EngineResult, ValidationError};
pub use state::{GameResult, MatchState, Phase, PlayerState};
