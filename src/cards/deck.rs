//! The 52-card universe and the opening deal.

use crate::core::{GameRng, MatchConfig, Side, SideMap};
use crate::zones::{Pile, Zone};

use super::definition::{Card, Rank, Suit};

/// Number of cards in the universe.
pub const DECK_SIZE: usize = 52;

/// Every card, in rank-then-suit order.
#[must_use]
pub fn universe() -> Vec<Card> {
    Rank::ALL
        .into_iter()
        .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
        .collect()
}

/// Result of the opening deal.
#[derive(Clone, Debug)]
pub struct Deal {
    pub hands: SideMap<Zone>,
    pub pile: Pile,
}

/// Shuffle the universe with the configured seed and deal opening hands.
///
/// Cards are dealt one at a time from the top, dealer first, alternating
/// until the non-dealer holds `non_dealer_hand` cards and the dealer holds
/// `dealer_hand`. What remains is the draw pile.
#[must_use]
pub fn deal(config: &MatchConfig) -> Deal {
    let mut cards = universe();
    GameRng::new(config.seed).shuffle(&mut cards);

    let mut pile: Pile = cards.into_iter().collect();
    let mut hands: SideMap<Zone> = SideMap::with_default();

    let dealer = config.dealer;
    let target = |side: Side| {
        if side == dealer {
            config.dealer_hand
        } else {
            config.non_dealer_hand
        }
    };

    let mut next = dealer;
    while Side::all().any(|s| hands[s].len() < target(s)) {
        if hands[next].len() < target(next) {
            match pile.pop() {
                Some(card) => {
                    hands[next].insert(card);
                }
                None => break,
            }
        }
        next = next.opponent();
    }

    Deal { hands, pile }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_universe_is_unique() {
        let cards = universe();
        let unique: FxHashSet<_> = cards.iter().copied().collect();
        assert_eq!(cards.len(), DECK_SIZE);
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_deal_sizes() {
        let config = MatchConfig::default().with_dealer(Side::Second);
        let deal = deal(&config);

        assert_eq!(deal.hands[Side::Second].len(), 6);
        assert_eq!(deal.hands[Side::First].len(), 5);
        assert_eq!(deal.pile.len(), DECK_SIZE - 11);
    }

    #[test]
    fn test_deal_is_seeded() {
        let a = deal(&MatchConfig::default().with_seed(99));
        let b = deal(&MatchConfig::default().with_seed(99));
        let c = deal(&MatchConfig::default().with_seed(100));

        assert_eq!(a.pile, b.pile);
        assert_eq!(a.hands, b.hands);
        assert_ne!(a.pile, c.pile);
    }

    #[test]
    fn test_deal_partitions_universe() {
        let deal = deal(&MatchConfig::default());
        let mut seen = FxHashSet::default();
        for (_, hand) in deal.hands.iter() {
            for card in hand.iter() {
                assert!(seen.insert(card));
            }
        }
        for card in deal.pile.iter() {
            assert!(seen.insert(card));
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }
}
