//! Many matches behind one handle.
//!
//! The registry maps ids to slots. Each slot has its own lock, so moves in
//! different matches never wait on each other, and one `watch` channel per
//! side carrying that side's latest snapshot. Publishing uses `send_replace`
//! and never blocks on slow or departed subscribers.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use super::{Match, Snapshot};
use crate::core::{EngineError, EngineResult, MatchConfig, Move, MoveRequest, Side, SideMap};

/// Match identifier.
pub type MatchId = u64;

/// Errors from registry calls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no match with id {0}")]
    UnknownMatch(MatchId),

    #[error("match {0} already exists")]
    DuplicateMatch(MatchId),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

struct MatchSlot {
    game: Mutex<Match>,
    feeds: SideMap<watch::Sender<Arc<Snapshot>>>,
}

impl MatchSlot {
    fn new(game: Match) -> Self {
        let feeds = SideMap::new(|side| watch::channel(Arc::new(game.snapshot(side))).0);
        Self { game: Mutex::new(game), feeds }
    }

    fn publish(&self, game: &Match) {
        for (side, feed) in self.feeds.iter() {
            feed.send_replace(Arc::new(game.snapshot(side)));
        }
    }
}

/// Matches keyed by id.
#[derive(Default)]
pub struct MatchRegistry {
    matches: RwLock<FxHashMap<MatchId, Arc<MatchSlot>>>,
}

impl MatchRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal a new match under `id`.
    pub fn create(&self, id: MatchId, config: MatchConfig) -> Result<(), RegistryError> {
        self.insert(id, Match::new(config))
    }

    /// Host an existing match under `id`.
    pub fn insert(&self, id: MatchId, game: Match) -> Result<(), RegistryError> {
        let slot = Arc::new(MatchSlot::new(game));
        let mut matches = self.matches.write().unwrap_or_else(PoisonError::into_inner);
        if matches.contains_key(&id) {
            return Err(RegistryError::DuplicateMatch(id));
        }
        matches.insert(id, slot);
        info!(id, "match created");
        Ok(())
    }

    /// Apply a move and publish fresh snapshots to both sides.
    pub fn submit(&self, id: MatchId, side: Side, mv: Move) -> Result<(), RegistryError> {
        self.commit(id, |game| game.apply(side, mv))
    }

    /// Apply a move in its wire form.
    pub fn submit_request(&self, id: MatchId, request: &MoveRequest) -> Result<(), RegistryError> {
        self.commit(id, |game| game.apply_request(request))
    }

    fn commit(
        &self,
        id: MatchId,
        apply: impl FnOnce(&mut Match) -> EngineResult<()>,
    ) -> Result<(), RegistryError> {
        let slot = self.slot(id)?;
        let mut game = slot.game.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = apply(&mut *game);
        // A fatal error still changed the match, so publish that too.
        let changed = match &outcome {
            Ok(()) => true,
            Err(err) => err.is_fatal(),
        };
        if changed {
            slot.publish(&game);
            debug!(id, turn = game.state().turn, "snapshots published");
        }
        outcome.map_err(RegistryError::from)
    }

    /// Follow `side`'s view of a match. The receiver starts at the current
    /// snapshot.
    pub fn subscribe(
        &self,
        id: MatchId,
        side: Side,
    ) -> Result<watch::Receiver<Arc<Snapshot>>, RegistryError> {
        Ok(self.slot(id)?.feeds[side].subscribe())
    }

    pub fn legal_moves(&self, id: MatchId, side: Side) -> Result<Vec<Move>, RegistryError> {
        let slot = self.slot(id)?;
        let game = slot.game.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(game.legal_moves(side))
    }

    pub fn snapshot(&self, id: MatchId, side: Side) -> Result<Snapshot, RegistryError> {
        let slot = self.slot(id)?;
        let game = slot.game.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(game.snapshot(side))
    }

    /// Drop a match. Subscribers see their channel close.
    pub fn remove(&self, id: MatchId) -> Result<(), RegistryError> {
        self.matches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|_| info!(id, "match removed"))
            .ok_or(RegistryError::UnknownMatch(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: MatchId) -> Result<Arc<MatchSlot>, RegistryError> {
        self.matches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UnknownMatch(id))
    }
}
