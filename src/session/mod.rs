//! Match orchestration.
//!
//! `Match` is the boundary the outside world talks to: it owns one
//! `MatchState`, routes moves through the rules engine, and reports typed
//! errors for moves it rejects. `MatchRegistry` holds many matches for a
//! server and publishes snapshots as they change.
//!
//! ## Example
//!
//! ```
//! use cuttle_engine::core::{MatchConfig, Move, Side};
//! use cuttle_engine::session::Match;
//!
//! let mut game = Match::new(MatchConfig::default().with_seed(7));
//! assert!(game.legal_moves(Side::Second).is_empty());
//!
//! game.apply(Side::First, Move::Draw).unwrap();
//! assert_eq!(game.state().active, Side::Second);
//! ```

pub mod registry;
pub mod snapshot;

pub use registry::{MatchId, MatchRegistry, RegistryError};
pub use snapshot::{HandView, PlayerView, Snapshot};

use tracing::warn;

use crate::core::{EngineResult, GameResult, MatchConfig, MatchState, Move, MoveRequest, Side};
use crate::rules::{Engine, RulesEngine};

/// One match and the engine that runs it.
#[derive(Clone, Debug)]
pub struct Match<R: RulesEngine = Engine> {
    state: MatchState,
    rules: R,
}

impl Match {
    /// Deal a new match.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_rules(MatchState::new(config), Engine)
    }
}

impl<R: RulesEngine> Match<R> {
    /// Wrap an existing state with a rules engine.
    pub fn with_rules(state: MatchState, rules: R) -> Self {
        Self { state, rules }
    }

    /// Legal moves for `side`. Empty unless `side` holds priority.
    #[must_use]
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.rules.legal_moves(&self.state, side)
    }

    /// Apply a move. Rejected moves leave the match as it was.
    pub fn apply(&mut self, side: Side, mv: Move) -> EngineResult<()> {
        self.rules
            .apply_move(&mut self.state, side, &mv)
            .inspect_err(|err| warn!(%side, %mv, %err, "move rejected"))
    }

    /// Apply a move in its wire form.
    pub fn apply_request(&mut self, request: &MoveRequest) -> EngineResult<()> {
        let mv = request.to_move().inspect_err(|err| {
            warn!(side = %request.side, kind = ?request.kind, %err, "malformed request");
        })?;
        self.apply(request.side, mv)
    }

    /// What `viewer` can see.
    #[must_use]
    pub fn snapshot(&self, viewer: Side) -> Snapshot {
        Snapshot::capture(&self.state, viewer)
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Final result, once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }
}
