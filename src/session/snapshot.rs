//! Per-viewer match snapshots.
//!
//! A snapshot is what one side is allowed to see: its own hand, the
//! opponent's hand only while an Eight reveals it, and everything public.
//! Zones are sorted so two snapshots of the same position compare equal and
//! serialize identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{MatchState, Phase, Side, SideMap};

/// A hand as seen by one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandView {
    Revealed(Vec<Card>),
    Hidden { size: usize },
}

impl HandView {
    /// Number of cards in the hand, whether or not they are shown.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            HandView::Revealed(cards) => cards.len(),
            HandView::Hidden { size } => *size,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One side's board as seen by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub hand: HandView,
    pub points: Vec<Card>,
    pub permanents: Vec<Card>,
    pub score: u32,
    pub win_threshold: u32,
    pub hand_visible: bool,
}

/// The whole match from one side's seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub viewer: Side,
    pub players: SideMap<PlayerView>,
    pub scrap: Vec<Card>,
    pub pile_size: usize,
    pub active: Side,
    pub priority: Side,
    pub passes: u32,
    pub turn: u32,
    pub phase: Phase,
    /// Jacks attached to each stolen point card.
    pub jacks: BTreeMap<Card, Vec<Card>>,
}

impl Snapshot {
    /// Build the view of `state` for `viewer`.
    #[must_use]
    pub fn capture(state: &MatchState, viewer: Side) -> Self {
        let players = SideMap::new(|side| {
            let player = state.player(side);
            let hand = if side == viewer || player.hand_visible {
                HandView::Revealed(player.hand.sorted())
            } else {
                HandView::Hidden { size: player.hand.len() }
            };
            PlayerView {
                hand,
                points: player.points.sorted(),
                permanents: player.permanents.sorted(),
                score: player.score,
                win_threshold: player.win_threshold,
                hand_visible: player.hand_visible,
            }
        });

        Self {
            viewer,
            players,
            scrap: state.scrap.sorted(),
            pile_size: state.pile.len(),
            active: state.active,
            priority: state.priority,
            passes: state.passes,
            turn: state.turn,
            phase: state.phase.clone(),
            jacks: state
                .jacks
                .iter()
                .map(|(&card, attached)| (card, attached.to_vec()))
                .collect(),
        }
    }

    /// Is the match over?
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    #[test]
    fn test_opponent_hand_hidden() {
        let state = MatchState::new(MatchConfig::default());
        let snapshot = Snapshot::capture(&state, Side::First);

        assert!(matches!(snapshot.players[Side::First].hand, HandView::Revealed(ref c) if c.len() == 5));
        assert_eq!(snapshot.players[Side::Second].hand, HandView::Hidden { size: 6 });
        assert_eq!(snapshot.pile_size, 41);
    }

    #[test]
    fn test_visible_hand_is_revealed() {
        let mut state = MatchState::new(MatchConfig::default());
        state.players[Side::Second].hand_visible = true;
        let snapshot = Snapshot::capture(&state, Side::First);

        assert_eq!(
            snapshot.players[Side::Second].hand,
            HandView::Revealed(state.player(Side::Second).hand.sorted())
        );
    }

    #[test]
    fn test_bincode_roundtrip() {
        let state = MatchState::new(MatchConfig::default().with_seed(11));
        let snapshot = Snapshot::capture(&state, Side::Second);

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snapshot);
    }
}
