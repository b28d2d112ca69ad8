//! Effect resolution - applying validated effects to the match.
//!
//! Nothing here fails. Callers validate first (see `targeting`), then hand
//! the effect over; the resolver only moves cards and keeps Jack
//! attachments consistent. Scores and thresholds are re-derived by the
//! caller with `MatchState::recount` afterwards.

use smallvec::SmallVec;

use crate::cards::{Card, Rank};
use crate::core::{MatchState, Side};

use super::{OneOff, Permanent};

/// What a resolved one-off still needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Fully applied.
    Done,
    /// The opponent must choose discards.
    AwaitDiscard,
    /// The controller must play this card, taken from the pile.
    AwaitReveal(Card),
}

/// Applies effects to match state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply a validated one-off for `side`.
    ///
    /// Counters never reach here: they only change the stack.
    pub fn resolve_one_off(state: &mut MatchState, side: Side, effect: &OneOff) -> Resolution {
        match *effect {
            OneOff::ScrapPoints => {
                for owner in Side::all() {
                    for card in state.player_mut(owner).points.drain() {
                        Self::scrap_attached_jacks(state, card);
                        state.scrap.insert(card);
                    }
                }
            }
            OneOff::ScrapPermanent { target } => {
                Self::remove_permanent(state, target);
                state.scrap.insert(target);
            }
            OneOff::Counter { .. } => {}
            OneOff::Recover { target } => {
                state.scrap.remove(target);
                state.player_mut(side).hand.insert(target);
            }
            OneOff::Discard => {
                if !state.player(side.opponent()).hand.is_empty() {
                    return Resolution::AwaitDiscard;
                }
            }
            OneOff::DrawTwo => {
                for _ in 0..2 {
                    if let Some(card) = state.pile.pop() {
                        state.player_mut(side).hand.insert(card);
                    }
                }
            }
            OneOff::ScrapPermanents => {
                for owner in Side::all() {
                    for card in state.player_mut(owner).permanents.drain() {
                        state.scrap.insert(card);
                    }
                }
                let jacked: Vec<(Card, usize)> =
                    state.jacks.drain().map(|(card, jacks)| (card, jacks.len())).collect();
                for (card, count) in jacked {
                    if count % 2 == 1 {
                        if let Some(holder) = state.points_holder(card) {
                            Self::move_point(state, card, holder, holder.opponent());
                        }
                    }
                }
            }
            OneOff::Reveal => {
                if let Some(card) = state.pile.pop() {
                    return Resolution::AwaitReveal(card);
                }
            }
            OneOff::Bounce { target } => {
                if let Some(owner) = Self::remove_permanent(state, target) {
                    state.player_mut(owner).hand.insert(target);
                }
            }
        }
        Resolution::Done
    }

    /// Put a validated permanent into play for `side`.
    pub fn enter_permanent(state: &mut MatchState, side: Side, card: Card, effect: &Permanent) {
        state.player_mut(side).permanents.insert(card);
        if let Permanent::Steal { target } = *effect {
            Self::attach_jack(state, card, target);
        }
    }

    /// Send a point card to the scrap along with any Jacks on it.
    pub fn scrap_point(state: &mut MatchState, card: Card) {
        if let Some(holder) = state.points_holder(card) {
            state.player_mut(holder).points.remove(card);
            Self::scrap_attached_jacks(state, card);
            state.scrap.insert(card);
        }
    }

    /// Take a permanent out of play, detaching it first if it is a Jack.
    ///
    /// Returns the side that controlled it.
    pub fn remove_permanent(state: &mut MatchState, card: Card) -> Option<Side> {
        let controller = state.permanent_controller(card)?;
        if card.rank == Rank::Jack {
            Self::detach_jack(state, card);
        }
        state.player_mut(controller).permanents.remove(card);
        Some(controller)
    }

    /// Move `target` to the side that does not currently hold it and record
    /// the Jack on it.
    fn attach_jack(state: &mut MatchState, jack: Card, target: Card) {
        let Some(holder) = state.points_holder(target) else {
            return;
        };
        Self::move_point(state, target, holder, holder.opponent());
        state.jacks.entry(target).or_insert_with(SmallVec::new).push(jack);
    }

    /// Remove one Jack from its card; the card goes wherever the new Jack
    /// count says it belongs.
    fn detach_jack(state: &mut MatchState, jack: Card) {
        let Some(target) = state.jack_target(jack) else {
            return;
        };
        let (Some(owner), Some(holder)) = (state.original_owner(target), state.points_holder(target))
        else {
            return;
        };

        if let Some(attached) = state.jacks.get_mut(&target) {
            attached.retain(|j| *j != jack);
            if attached.is_empty() {
                state.jacks.remove(&target);
            }
        }

        let new_holder = if state.jack_count(target) % 2 == 0 {
            owner
        } else {
            owner.opponent()
        };
        if new_holder != holder {
            Self::move_point(state, target, holder, new_holder);
        }
    }

    fn scrap_attached_jacks(state: &mut MatchState, card: Card) {
        if let Some(jacks) = state.jacks.remove(&card) {
            for jack in jacks {
                if let Some(controller) = state.permanent_controller(jack) {
                    state.player_mut(controller).permanents.remove(jack);
                    state.scrap.insert(jack);
                }
            }
        }
    }

    fn move_point(state: &mut MatchState, card: Card, from: Side, to: Side) {
        if state.player_mut(from).points.remove(card) {
            state.player_mut(to).points.insert(card);
        }
    }
}
