//! The turn engine.
//!
//! `Engine` owns the rules: each public operation validates a move in full,
//! then applies it. A failed operation leaves the match untouched.
//! `RulesEngine` is the seam the orchestrator talks to: legal moves, apply,
//! and terminal detection.
//!
//! ## Turn flow
//!
//! ```text
//! AwaitingMove ──draw / point / scuttle / permanent / pass──▶ end_turn
//!      │
//!      └─one-off──▶ ResolvingEffect(Response) ──counter──▶ (flip priority)
//!                          │
//!                          └─resolve──▶ applied ─▶ end_turn
//!                                     ├─▶ Discard (Four)  ──discard──▶ end_turn
//!                                     └─▶ Reveal (Seven)  ──reveal───▶ play it
//! ```
//!
//! Every score change is followed by a win check, which runs before any
//! turn swap. A winner, once set, ends the match.

use tracing::{debug, error, info};

use crate::cards::{can_scuttle, Card};
use crate::core::action::{Move, MoveRecord};
use crate::core::error::{EngineError, EngineResult, PlayKind, ValidationError};
use crate::core::{GameResult, MatchState, Phase, Side};
use crate::effects::targeting::{validate_one_off, validate_permanent};
use crate::effects::{EffectResolver, OneOff, Permanent, Resolution};
use crate::stack::{PendingEffect, Stage};

use super::legal;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty for a side without priority
/// - `apply_move`: must reject moves from a side without priority, and must
///   leave the state untouched on any recoverable error
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Legal moves for a side.
    fn legal_moves(&self, state: &MatchState, side: Side) -> Vec<Move>;

    /// Apply a move submitted by `side`.
    fn apply_move(&self, state: &mut MatchState, side: Side, mv: &Move) -> EngineResult<()>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        state.result().cloned()
    }
}

/// Cuttle rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine;

impl RulesEngine for Engine {
    fn legal_moves(&self, state: &MatchState, side: Side) -> Vec<Move> {
        legal::legal_moves(state, side)
    }

    fn apply_move(&self, state: &mut MatchState, side: Side, mv: &Move) -> EngineResult<()> {
        if state.is_over() || side != state.priority {
            return Err(EngineError::IllegalPriority { side });
        }

        let turn = state.turn;
        Self::dispatch(state, mv)?;
        state.history.push_back(MoveRecord { side, mv: mv.clone(), turn });
        debug!(%side, %mv, turn, "move committed");

        if let Err(reason) = state.verify() {
            error!(%side, %mv, %reason, "invariant violated, aborting match");
            state.phase = Phase::GameOver(GameResult::Aborted(reason.clone()));
            return Err(EngineError::Invariant(reason));
        }
        Ok(())
    }
}

impl Engine {
    fn dispatch(state: &mut MatchState, mv: &Move) -> EngineResult<()> {
        match mv {
            Move::Draw => Self::draw_card(state),
            Move::Pass => Self::pass_turn(state),
            Move::Point(card) => Self::play_point_card(state, *card),
            Move::Scuttle { attacker, defender } => Self::scuttle(state, *attacker, *defender),
            Move::OneOff { card, mode, targets } => Self::play_one_off(state, *card, *mode, targets),
            Move::Permanent { card, target } => Self::play_permanent(state, *card, *target),
            Move::Resolve => Self::resolve(state),
            Move::Discard { cards } => Self::discard(state, cards),
            Move::Reveal(inner) => Self::reveal(state, inner),
        }
    }

    // === Ordinary moves ===

    /// Draw the top card into the active hand and end the turn.
    pub fn draw_card(state: &mut MatchState) -> EngineResult<()> {
        Self::ensure_awaiting(state)?;
        let card = state.pile.pop().ok_or(EngineError::EmptyPile)?;
        let side = state.active;
        state.player_mut(side).hand.insert(card);
        state.passes = 0;
        Self::end_turn(state);
        Ok(())
    }

    /// Play a card from the active hand for points.
    pub fn play_point_card(state: &mut MatchState, card: Card) -> EngineResult<()> {
        Self::ensure_awaiting(state)?;
        let side = state.active;
        Self::ensure_in_hand(state, side, card)?;
        if !card.can_be_point() {
            return Err(ValidationError::Ineligible { card, play: PlayKind::Point }.into());
        }

        let player = state.player_mut(side);
        player.hand.remove(card);
        player.points.insert(card);
        state.passes = 0;
        Self::finish_turn(state);
        Ok(())
    }

    /// Destroy an opponent point card; both cards go to the scrap.
    pub fn scuttle(state: &mut MatchState, attacker: Card, defender: Card) -> EngineResult<()> {
        Self::ensure_awaiting(state)?;
        let side = state.active;
        Self::ensure_in_hand(state, side, attacker)?;
        if !state.player(side.opponent()).points.contains(defender) {
            return Err(ValidationError::NotInPoints(defender).into());
        }
        if !can_scuttle(attacker, defender) {
            return Err(ValidationError::IllegalScuttle { attacker, defender }.into());
        }

        state.player_mut(side).hand.remove(attacker);
        EffectResolver::scrap_point(state, defender);
        state.scrap.insert(attacker);
        state.passes = 0;
        Self::finish_turn(state);
        Ok(())
    }

    /// Play a one-off. It waits on the stack for the opponent's response.
    ///
    /// A Two in mode 1 is a counter: it is played by the side holding
    /// priority against the top of the stack instead.
    pub fn play_one_off(
        state: &mut MatchState,
        card: Card,
        mode: u8,
        targets: &[Card],
    ) -> EngineResult<()> {
        Self::ensure_live(state)?;
        let effect = OneOff::parse(card, mode, targets)?;
        if let OneOff::Counter { .. } = effect {
            return Self::counter(state, card, &effect);
        }

        Self::ensure_awaiting(state)?;
        let side = state.active;
        Self::ensure_in_hand(state, side, card)?;
        validate_one_off(state, side, &effect)?;

        state.player_mut(side).hand.remove(card);
        state.passes = 0;
        state.phase = Phase::ResolvingEffect(PendingEffect::new(card, effect, side));
        state.priority = side.opponent();
        Ok(())
    }

    /// Play an 8, J, Q or K from the active hand.
    pub fn play_permanent(
        state: &mut MatchState,
        card: Card,
        target: Option<Card>,
    ) -> EngineResult<()> {
        Self::ensure_awaiting(state)?;
        let side = state.active;
        Self::ensure_in_hand(state, side, card)?;
        let effect = Permanent::parse(card, target)?;
        validate_permanent(state, side, &effect)?;

        state.player_mut(side).hand.remove(card);
        EffectResolver::enter_permanent(state, side, card, &effect);
        state.passes = 0;
        Self::finish_turn(state);
        Ok(())
    }

    /// Pass. Enough consecutive passes end the match in a draw.
    pub fn pass_turn(state: &mut MatchState) -> EngineResult<()> {
        Self::ensure_awaiting(state)?;
        state.passes += 1;
        if state.passes >= state.config.pass_limit {
            info!(passes = state.passes, "match drawn on passes");
            state.phase = Phase::GameOver(GameResult::Draw);
        } else {
            Self::end_turn(state);
        }
        Ok(())
    }

    /// Hand the turn to the other side. Does not evaluate win or draw.
    pub fn end_turn(state: &mut MatchState) {
        state.active = state.active.opponent();
        state.priority = state.active;
        state.turn += 1;
    }

    // === Stack ===

    fn counter(state: &mut MatchState, card: Card, effect: &OneOff) -> EngineResult<()> {
        let side = state.priority;
        Self::ensure_in_hand(state, side, card)?;
        validate_one_off(state, side, effect)?;

        state.player_mut(side).hand.remove(card);
        state.passes = 0;
        if let Phase::ResolvingEffect(pending) = &mut state.phase {
            pending.push_counter(card, side);
            state.priority = pending.responder();
        }
        Ok(())
    }

    /// Let the stack resolve. Counters go to the scrap; the base effect
    /// applies unless it was countered an odd number of times.
    pub fn resolve(state: &mut MatchState) -> EngineResult<()> {
        Self::ensure_live(state)?;
        let mut pending = match &state.phase {
            Phase::ResolvingEffect(p) if p.stage == Stage::Response => p.clone(),
            other => return Err(ValidationError::WrongPhase(other.name()).into()),
        };

        let negated = pending.is_negated();
        let controller = pending.controller;
        for counter in pending.counters.drain(..) {
            state.scrap.insert(counter.card);
        }

        if negated {
            debug!(card = %pending.card, "one-off countered");
            state.scrap.insert(pending.card);
            Self::settle(state);
            return Ok(());
        }

        match EffectResolver::resolve_one_off(state, controller, &pending.effect) {
            Resolution::Done => {
                state.scrap.insert(pending.card);
                Self::settle(state);
            }
            Resolution::AwaitDiscard => {
                pending.stage = Stage::Discard;
                state.phase = Phase::ResolvingEffect(pending);
                state.priority = controller.opponent();
            }
            Resolution::AwaitReveal(revealed) => {
                let workspace = reveal_workspace(state, &pending, revealed);
                if legal::enumerate(&workspace, controller, &[revealed], true).is_empty() {
                    debug!(card = %revealed, "revealed card has no play");
                    state.scrap.insert(revealed);
                    state.scrap.insert(pending.card);
                    Self::settle(state);
                } else {
                    pending.stage = Stage::Reveal(revealed);
                    state.phase = Phase::ResolvingEffect(pending);
                    state.priority = controller;
                }
            }
        }
        Ok(())
    }

    /// Discard to a Four. The side holding priority names its own cards:
    /// two, or one if that is all it has.
    pub fn discard(state: &mut MatchState, cards: &[Card]) -> EngineResult<()> {
        Self::ensure_live(state)?;
        let four = match &state.phase {
            Phase::ResolvingEffect(p) if p.stage == Stage::Discard => p.card,
            other => return Err(ValidationError::WrongPhase(other.name()).into()),
        };
        let side = state.priority;
        let required = state.player(side).hand.len().min(2);
        if cards.len() != required || (required == 2 && cards[0] == cards[1]) {
            return Err(ValidationError::Malformed("discard two distinct cards from hand").into());
        }
        for &card in cards {
            Self::ensure_in_hand(state, side, card)?;
        }

        for &card in cards {
            state.player_mut(side).hand.remove(card);
            state.scrap.insert(card);
        }
        state.scrap.insert(four);
        Self::settle(state);
        Ok(())
    }

    /// Play the card revealed by a Seven. `inner` is the play, naming the
    /// revealed card as if it were in hand.
    pub fn reveal(state: &mut MatchState, inner: &Move) -> EngineResult<()> {
        Self::ensure_live(state)?;
        let (pending, revealed) = match &state.phase {
            Phase::ResolvingEffect(p) => match p.stage {
                Stage::Reveal(card) => (p.clone(), card),
                _ => return Err(ValidationError::WrongPhase(state.phase.name()).into()),
            },
            other => return Err(ValidationError::WrongPhase(other.name()).into()),
        };

        match inner {
            Move::Point(_) | Move::Scuttle { .. } | Move::OneOff { .. } | Move::Permanent { .. } => {}
            _ => return Err(ValidationError::Malformed("a revealed card must be played").into()),
        }
        if inner.card() != Some(revealed) {
            return Err(ValidationError::InvalidTarget(inner.card().unwrap_or(revealed)).into());
        }

        let mut workspace = reveal_workspace(state, &pending, revealed);
        Self::dispatch(&mut workspace, inner)?;
        *state = workspace;
        Ok(())
    }

    // === Helpers ===

    /// Close a resolved effect: back to awaiting a move, then the usual
    /// win check and turn end.
    fn settle(state: &mut MatchState) {
        state.phase = Phase::AwaitingMove;
        state.priority = state.active;
        Self::finish_turn(state);
    }

    /// Re-derive scores, check for a winner, and end the turn if the match
    /// goes on.
    fn finish_turn(state: &mut MatchState) {
        state.recount();
        if !Self::check_win(state) {
            Self::end_turn(state);
        }
    }

    /// Active side first, then the opponent.
    fn check_win(state: &mut MatchState) -> bool {
        if state.is_over() {
            return true;
        }
        for side in [state.active, state.active.opponent()] {
            let player = state.player(side);
            if player.score >= player.win_threshold {
                info!(%side, score = player.score, threshold = player.win_threshold, "match won");
                state.phase = Phase::GameOver(GameResult::Winner(side));
                return true;
            }
        }
        false
    }

    fn ensure_live(state: &MatchState) -> EngineResult<()> {
        if state.is_over() {
            Err(EngineError::IllegalPriority { side: state.priority })
        } else {
            Ok(())
        }
    }

    fn ensure_awaiting(state: &MatchState) -> EngineResult<()> {
        Self::ensure_live(state)?;
        match state.phase {
            Phase::AwaitingMove => Ok(()),
            ref other => Err(ValidationError::WrongPhase(other.name()).into()),
        }
    }

    fn ensure_in_hand(state: &MatchState, side: Side, card: Card) -> EngineResult<()> {
        if state.player(side).hand.contains(card) {
            Ok(())
        } else {
            Err(ValidationError::NotInHand(card).into())
        }
    }
}

/// A copy of `state` in which the Seven has gone to the scrap and the
/// revealed card sits in its controller's hand, ready to be played like any
/// other card. Only committed if the play succeeds.
pub(crate) fn reveal_workspace(state: &MatchState, pending: &PendingEffect, revealed: Card) -> MatchState {
    let mut workspace = state.clone();
    workspace.scrap.insert(pending.card);
    workspace.phase = Phase::AwaitingMove;
    workspace.active = pending.controller;
    workspace.priority = pending.controller;
    workspace.player_mut(pending.controller).hand.insert(revealed);
    workspace
}
