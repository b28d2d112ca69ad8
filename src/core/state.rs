//! Match state.
//!
//! ## PlayerState
//!
//! One side's zones plus the values derived from them:
//! - hand, points, permanents
//! - score, win threshold, hand visibility
//!
//! ## MatchState
//!
//! Both sides plus the shared zones, turn bookkeeping, the phase machine,
//! and Jack attachments.
//!
//! Zones use `im` persistent collections, so `MatchState::clone` is O(1)
//! and the engine can work on a copy and commit it whole.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::MoveRecord;
use super::config::MatchConfig;
use super::player::{Side, SideMap};
use crate::cards::{deck, Card, Rank};
use crate::stack::PendingEffect;
use crate::zones::{Pile, Zone};

/// Terminal result of a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Ended on consecutive passes.
    Draw,
    /// Stopped after an internal invariant failed.
    Aborted(String),
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Where the match is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The active side may make an ordinary move.
    AwaitingMove,
    /// A one-off is in flight.
    ResolvingEffect(PendingEffect),
    /// Terminal. Nothing may change.
    GameOver(GameResult),
}

impl Phase {
    /// Short name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingMove => "awaiting a move",
            Phase::ResolvingEffect(_) => "an effect is resolving",
            Phase::GameOver(_) => "the match is over",
        }
    }
}

/// One side's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: Zone,
    pub points: Zone,
    pub permanents: Zone,

    /// Sum of point values in `points`. Kept in step by `MatchState::recount`.
    pub score: u32,

    /// Score needed to win.
    pub win_threshold: u32,

    /// Whether this side's hand is shown to the opponent.
    pub hand_visible: bool,
}

impl PlayerState {
    #[must_use]
    pub fn new(hand: Zone, win_threshold: u32) -> Self {
        Self {
            hand,
            points: Zone::new(),
            permanents: Zone::new(),
            score: 0,
            win_threshold,
            hand_visible: false,
        }
    }

    /// Score computed from the points zone.
    #[must_use]
    pub fn point_total(&self) -> u32 {
        self.points.iter().filter_map(Card::point_value).sum()
    }

    /// Count permanents of a rank.
    #[must_use]
    pub fn count_permanents(&self, rank: Rank) -> usize {
        self.permanents.iter().filter(|c| c.rank == rank).count()
    }

    /// Does this side control a Queen other than `except`?
    #[must_use]
    pub fn has_queen_except(&self, except: Card) -> bool {
        self.permanents
            .iter()
            .any(|c| c.rank == Rank::Queen && c != except)
    }
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    pub players: SideMap<PlayerState>,
    pub scrap: Zone,
    pub pile: Pile,

    /// Consecutive passes.
    pub passes: u32,

    /// Whose turn it is.
    pub active: Side,

    /// Who may act right now.
    pub priority: Side,

    pub phase: Phase,

    /// Jacks attached to each point card, oldest first.
    pub jacks: FxHashMap<Card, SmallVec<[Card; 2]>>,

    /// Turn number, starting at 1.
    pub turn: u32,

    pub history: Vector<MoveRecord>,
}

impl MatchState {
    /// Shuffle, deal and set up a new match.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let deal = deck::deal(&config);
        let first = config.first_player();
        let threshold = config.win_threshold;

        Self {
            players: SideMap::new(|side| PlayerState::new(deal.hands[side].clone(), threshold)),
            scrap: Zone::new(),
            pile: deal.pile,
            passes: 0,
            active: first,
            priority: first,
            phase: Phase::AwaitingMove,
            jacks: FxHashMap::default(),
            turn: 1,
            history: Vector::new(),
            config,
        }
    }

    #[must_use]
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        match &self.phase {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    /// The in-flight effect, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingEffect> {
        match &self.phase {
            Phase::ResolvingEffect(pending) => Some(pending),
            _ => None,
        }
    }

    /// The side whose points zone holds `card`.
    #[must_use]
    pub fn points_holder(&self, card: Card) -> Option<Side> {
        Side::all().find(|&s| self.players[s].points.contains(card))
    }

    /// The side whose permanents zone holds `card`.
    #[must_use]
    pub fn permanent_controller(&self, card: Card) -> Option<Side> {
        Side::all().find(|&s| self.players[s].permanents.contains(card))
    }

    /// How many Jacks currently sit on `card`.
    #[must_use]
    pub fn jack_count(&self, card: Card) -> usize {
        self.jacks.get(&card).map_or(0, |attached| attached.len())
    }

    /// The side that first played `card` for points.
    ///
    /// Even Jack counts leave a card with its owner, odd counts with the
    /// opponent.
    #[must_use]
    pub fn original_owner(&self, card: Card) -> Option<Side> {
        let holder = self.points_holder(card)?;
        Some(if self.jack_count(card) % 2 == 0 {
            holder
        } else {
            holder.opponent()
        })
    }

    /// The point card a Jack is attached to.
    #[must_use]
    pub fn jack_target(&self, jack: Card) -> Option<Card> {
        self.jacks
            .iter()
            .find(|(_, attached)| attached.contains(&jack))
            .map(|(&target, _)| target)
    }

    /// Is `jack` attached under a newer Jack? Only the newest Jack on a card
    /// can be removed on its own.
    #[must_use]
    pub fn is_buried_jack(&self, jack: Card) -> bool {
        self.jacks
            .values()
            .any(|attached| attached.contains(&jack) && attached.last() != Some(&jack))
    }

    /// Re-derive scores, thresholds and hand visibility from the board.
    ///
    /// Kings set their controller's threshold, Eights reveal the opposing
    /// hand. With no permanents both fall back to the defaults.
    pub fn recount(&mut self) {
        let eights = SideMap::new(|s| self.players[s].count_permanents(Rank::Eight));
        for side in Side::all() {
            let kings = self.players[side].count_permanents(Rank::King);
            let threshold = self.config.threshold_for_kings(kings);
            let player = &mut self.players[side];
            player.score = player.point_total();
            player.win_threshold = threshold;
            player.hand_visible = eights[side.opponent()] > 0;
        }
    }

    /// Every card in every zone, with duplicates kept.
    pub fn all_cards(&self) -> impl Iterator<Item = Card> + '_ {
        let per_player = self.players.iter().flat_map(|(_, p)| {
            p.hand.iter().chain(p.points.iter()).chain(p.permanents.iter())
        });
        let stacked: Vec<Card> = self.pending().map(|p| p.cards().collect()).unwrap_or_default();
        per_player
            .chain(self.scrap.iter())
            .chain(self.pile.iter())
            .chain(stacked)
    }

    /// Check the structural invariants.
    ///
    /// - every card of the deck is in exactly one place
    /// - each score equals its points zone
    /// - each Jack attachment names a point card and Jacks in play
    pub fn verify(&self) -> Result<(), String> {
        let mut seen = rustc_hash::FxHashSet::default();
        for card in self.all_cards() {
            if !seen.insert(card) {
                return Err(format!("{card} appears in more than one zone"));
            }
        }
        if seen.len() != deck::DECK_SIZE {
            return Err(format!("{} cards in play, expected {}", seen.len(), deck::DECK_SIZE));
        }

        for (side, player) in self.players.iter() {
            if player.score != player.point_total() {
                return Err(format!(
                    "{side} score {} does not match points {}",
                    player.score,
                    player.point_total()
                ));
            }
            if let Some(card) = player.points.iter().find(|c| !c.can_be_point()) {
                return Err(format!("{card} is not a point card"));
            }
        }

        for (target, attached) in &self.jacks {
            if self.points_holder(*target).is_none() {
                return Err(format!("{target} has Jacks but is not in play"));
            }
            if let Some(jack) = attached
                .iter()
                .find(|j| j.rank != Rank::Jack || self.permanent_controller(**j).is_none())
            {
                return Err(format!("{jack} is attached to {target} but not in play"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_match() {
        let state = MatchState::new(MatchConfig::default());

        assert_eq!(state.active, Side::First);
        assert_eq!(state.priority, Side::First);
        assert_eq!(state.player(Side::First).hand.len(), 5);
        assert_eq!(state.player(Side::Second).hand.len(), 6);
        assert_eq!(state.pile.len(), 41);
        assert_eq!(state.phase, Phase::AwaitingMove);
        assert!(state.verify().is_ok());
    }

    #[test]
    fn test_verify_catches_duplicates() {
        let mut state = MatchState::new(MatchConfig::default());
        let top = state.pile.top().unwrap();
        state.scrap.insert(top);

        assert!(state.verify().unwrap_err().contains("more than one zone"));
    }

    #[test]
    fn test_verify_catches_stale_score() {
        let mut state = MatchState::new(MatchConfig::default());
        state.players[Side::First].score = 4;

        assert!(state.verify().is_err());
    }

    #[test]
    fn test_recount_applies_permanents() {
        let mut state = MatchState::new(MatchConfig::default());
        let king = card("KH");
        let eight = card("8C");
        // Pull the two cards out of wherever they were dealt.
        for side in Side::all() {
            state.players[side].hand.remove(king);
            state.players[side].hand.remove(eight);
        }
        state.pile = state.pile.iter().filter(|&c| c != king && c != eight).collect();
        state.players[Side::First].permanents.insert(king);
        state.players[Side::First].permanents.insert(eight);

        state.recount();

        assert_eq!(state.player(Side::First).win_threshold, 14);
        assert_eq!(state.player(Side::Second).win_threshold, 21);
        assert!(state.player(Side::Second).hand_visible);
        assert!(!state.player(Side::First).hand_visible);
        assert!(state.verify().is_ok());
    }

    #[test]
    fn test_original_owner_follows_parity() {
        let mut state = MatchState::new(MatchConfig::default());
        let seven = card("7S");
        for side in Side::all() {
            state.players[side].hand.remove(seven);
        }
        state.pile = state.pile.iter().filter(|&c| c != seven).collect();
        state.players[Side::Second].points.insert(seven);

        assert_eq!(state.original_owner(seven), Some(Side::Second));

        state.jacks.insert(seven, SmallVec::from_slice(&[card("JC")]));
        assert_eq!(state.original_owner(seven), Some(Side::First));
    }

    #[test]
    fn test_json_roundtrip() {
        let state = MatchState::new(MatchConfig::default().with_seed(3));
        let json = serde_json::to_string(&state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
