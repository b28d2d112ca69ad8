//! Legal-move enumeration.
//!
//! `legal_moves` answers "what may the side holding priority do now?".
//! It follows the phase machine: ordinary moves while awaiting a move,
//! counters while a one-off waits for a response, discard choices for a
//! Four, and the revealed card's plays for a Seven.
//!
//! Output is sorted by card so the same position always yields the same
//! list.

use crate::cards::{can_scuttle, Card, Rank};
use crate::core::action::{Move, MODE_TWO_COUNTER, MODE_TWO_SCRAP};
use crate::core::{MatchState, Phase, Side};
use crate::effects::targeting::is_shielded;
use crate::stack::Stage;

use super::engine::reveal_workspace;

/// Every move `side` may submit right now. Empty if `side` lacks priority
/// or the match is over.
#[must_use]
pub fn legal_moves(state: &MatchState, side: Side) -> Vec<Move> {
    if side != state.priority {
        return Vec::new();
    }

    match &state.phase {
        Phase::GameOver(_) => Vec::new(),
        Phase::AwaitingMove => {
            let hand = state.player(side).hand.sorted();
            enumerate(state, side, &hand, false)
        }
        Phase::ResolvingEffect(pending) => match pending.stage {
            Stage::Response => {
                let (top, top_side) = pending.top();
                let mut moves = vec![Move::Resolve];
                if !is_shielded(state, top_side, top) {
                    moves.extend(
                        state
                            .player(side)
                            .hand
                            .sorted()
                            .into_iter()
                            .filter(|c| c.rank == Rank::Two)
                            .map(|two| Move::one_off(two, MODE_TWO_COUNTER, &[top])),
                    );
                }
                moves
            }
            Stage::Discard => discard_choices(&state.player(side).hand.sorted()),
            Stage::Reveal(card) => {
                let workspace = reveal_workspace(state, pending, card);
                enumerate(&workspace, side, &[card], true)
                    .into_iter()
                    .map(|mv| Move::Reveal(Box::new(mv)))
                    .collect()
            }
        },
    }
}

/// Enumerate the plays available from `hand` for `side`.
///
/// With `transient` set (a Seven's one-card hand) there is no draw or pass
/// option: the cards must be played or are lost.
#[must_use]
pub fn enumerate(state: &MatchState, side: Side, hand: &[Card], transient: bool) -> Vec<Move> {
    let mut moves = Vec::new();
    if !transient {
        moves.push(if state.pile.is_empty() { Move::Pass } else { Move::Draw });
    }

    let opponent = side.opponent();
    let opp_points = state.player(opponent).points.sorted();
    let opp_permanents = state.player(opponent).permanents.sorted();

    for &card in hand {
        if card.can_be_point() {
            moves.push(Move::Point(card));
            moves.extend(
                opp_points
                    .iter()
                    .filter(|&&d| can_scuttle(card, d))
                    .map(|&defender| Move::Scuttle { attacker: card, defender }),
            );
        }

        if card.can_be_one_off() {
            one_off_moves(state, side, card, &opp_permanents, &mut moves);
        }

        if card.can_be_permanent() {
            if card.rank == Rank::Jack {
                moves.extend(
                    opp_points
                        .iter()
                        .filter(|&&d| !is_shielded(state, opponent, d))
                        .map(|&d| Move::Permanent { card, target: Some(d) }),
                );
            } else {
                moves.push(Move::Permanent { card, target: None });
            }
        }
    }

    moves
}

fn one_off_moves(
    state: &MatchState,
    side: Side,
    card: Card,
    opp_permanents: &[Card],
    out: &mut Vec<Move>,
) {
    let opponent = side.opponent();
    match card.rank {
        Rank::Ace | Rank::Six => out.push(Move::one_off(card, 0, &[])),
        Rank::Four => {
            if !state.player(opponent).hand.is_empty() {
                out.push(Move::one_off(card, 0, &[]));
            }
        }
        Rank::Five | Rank::Seven => {
            if !state.pile.is_empty() {
                out.push(Move::one_off(card, 0, &[]));
            }
        }
        Rank::Two => out.extend(
            opp_permanents
                .iter()
                .filter(|&&p| !is_shielded(state, opponent, p) && !state.is_buried_jack(p))
                .map(|&p| Move::one_off(card, MODE_TWO_SCRAP, &[p])),
        ),
        Rank::Three => out.extend(
            state
                .scrap
                .sorted()
                .into_iter()
                .map(|c| Move::one_off(card, 0, &[c])),
        ),
        Rank::Nine => {
            for owner in Side::all() {
                out.extend(
                    state
                        .player(owner)
                        .permanents
                        .sorted()
                        .into_iter()
                        .filter(|&p| !state.is_buried_jack(p))
                        .map(|p| Move::one_off(card, 0, &[p])),
                );
            }
        }
        _ => {}
    }
}

/// Every way to discard two cards (or the only card) from `hand`.
fn discard_choices(hand: &[Card]) -> Vec<Move> {
    match hand {
        [] => Vec::new(),
        [only] => vec![Move::Discard { cards: [*only].into_iter().collect() }],
        _ => {
            let mut moves = Vec::new();
            for (i, &a) in hand.iter().enumerate() {
                for &b in &hand[i + 1..] {
                    moves.push(Move::Discard { cards: [a, b].into_iter().collect() });
                }
            }
            moves
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    #[test]
    fn test_opening_moves_start_with_draw() {
        let state = MatchState::new(MatchConfig::default());
        let moves = legal_moves(&state, Side::First);

        assert_eq!(moves[0], Move::Draw);
        assert!(moves.len() > 1);
        assert!(legal_moves(&state, Side::Second).is_empty());
    }

    #[test]
    fn test_transient_has_no_draw() {
        let state = MatchState::new(MatchConfig::default());
        let ten: Card = "10D".parse().unwrap();
        let moves = enumerate(&state, Side::First, &[ten], true);

        assert_eq!(moves, vec![Move::Point(ten)]);
    }

    #[test]
    fn test_discard_choices() {
        let cards: Vec<Card> = ["2C", "5D", "KH"].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(discard_choices(&cards).len(), 3);
        assert_eq!(discard_choices(&cards[..1]).len(), 1);
        assert!(discard_choices(&[]).is_empty());
    }
}
