//! Card containers.
//!
//! - `Zone`: unordered, duplicate-free (hand, points, permanents, scrap)
//! - `Pile`: ordered stack for the draw pile, top = next draw
//!
//! Both are backed by `im` persistent collections so cloning a whole match
//! for a snapshot is O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// An unordered set of cards.
///
/// ## Usage
///
/// ```
/// use cuttle_engine::cards::Card;
/// use cuttle_engine::zones::Zone;
///
/// let mut hand = Zone::new();
/// let ace: Card = "AS".parse().unwrap();
///
/// assert!(hand.insert(ace));
/// assert!(!hand.insert(ace)); // already present
/// assert!(hand.contains(ace));
/// assert!(hand.remove(ace));
/// assert!(hand.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    cards: ImHashSet<Card>,
}

impl Zone {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card. Returns `false` if it was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        self.cards.insert(card).is_none()
    }

    /// Remove a card. Returns `false` if it was not present.
    pub fn remove(&mut self, card: Card) -> bool {
        self.cards.remove(&card).is_some()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// Cards sorted by rank then suit, for stable output.
    #[must_use]
    pub fn sorted(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.iter().collect();
        cards.sort();
        cards
    }

    /// Remove and return every card.
    pub fn drain(&mut self) -> Vec<Card> {
        let cards = self.sorted();
        self.cards.clear();
        cards
    }
}

impl FromIterator<Card> for Zone {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// The ordered draw pile. Index 0 is the bottom, the last card is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Take the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Look at the top card without removing it.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
