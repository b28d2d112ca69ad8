//! Board setup helpers shared by the integration tests.
//!
//! Positions are built from a freshly dealt match by moving named cards
//! between zones. Cards pushed out of a hand go to the bottom of the pile,
//! so the 52-card partition always holds.

#![allow(dead_code)]

use cuttle_engine::cards::Card;
use cuttle_engine::core::{MatchConfig, MatchState, Side};
use cuttle_engine::rules::Engine;
use cuttle_engine::session::Match;

pub fn card(code: &str) -> Card {
    code.parse().unwrap()
}

pub fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|c| card(c)).collect()
}

/// Where to put a card.
#[derive(Clone, Copy, Debug)]
pub enum At {
    Hand(Side),
    Points(Side),
    Permanents(Side),
    Scrap,
    PileTop,
    PileBottom,
}

/// Take `card` out of whatever zone holds it.
pub fn take(state: &mut MatchState, card: Card) {
    for side in Side::all() {
        let player = state.player_mut(side);
        player.hand.remove(card);
        player.points.remove(card);
        player.permanents.remove(card);
    }
    state.scrap.remove(card);
    state.pile = state.pile.iter().filter(|&c| c != card).collect();
}

/// Move `card` to `at`.
pub fn put(state: &mut MatchState, code: &str, at: At) -> Card {
    let card = card(code);
    take(state, card);
    match at {
        At::Hand(side) => {
            state.player_mut(side).hand.insert(card);
        }
        At::Points(side) => {
            state.player_mut(side).points.insert(card);
        }
        At::Permanents(side) => {
            state.player_mut(side).permanents.insert(card);
        }
        At::Scrap => {
            state.scrap.insert(card);
        }
        At::PileTop => state.pile.push(card),
        At::PileBottom => {
            state.pile = std::iter::once(card).chain(state.pile.iter()).collect();
        }
    }
    card
}

/// Send every card in `side`'s hand to the bottom of the pile.
pub fn empty_hand(state: &mut MatchState, side: Side) {
    for card in state.player(side).hand.sorted() {
        put(state, &card.code(), At::PileBottom);
    }
}

/// Move every pile card to the scrap.
pub fn empty_pile(state: &mut MatchState) {
    while let Some(card) = state.pile.pop() {
        state.scrap.insert(card);
    }
}

/// A dealt match with both hands emptied, ready to be arranged.
pub fn blank() -> MatchState {
    let mut state = MatchState::new(MatchConfig::default().with_seed(17));
    empty_hand(&mut state, Side::First);
    empty_hand(&mut state, Side::Second);
    state
}

/// Re-derive scores after arranging a board and check it is consistent.
pub fn ready(mut state: MatchState) -> MatchState {
    state.recount();
    state.verify().unwrap();
    state
}

pub fn hand(state: &MatchState, side: Side) -> Vec<Card> {
    state.player(side).hand.sorted()
}

pub fn points(state: &MatchState, side: Side) -> Vec<Card> {
    state.player(side).points.sorted()
}

pub fn permanents(state: &MatchState, side: Side) -> Vec<Card> {
    state.player(side).permanents.sorted()
}

/// Wrap an arranged board in a match.
pub fn start(state: MatchState) -> Match {
    Match::with_rules(ready(state), Engine)
}
