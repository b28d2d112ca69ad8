//! Card definitions - rank, suit and the play-eligibility rules.
//!
//! A `Card` is a plain `(rank, suit)` value. Everything that changes while a
//! card is in play (which side holds it, how many Jacks sit on it) lives in
//! the match state, so cards can be hashed, compared and copied freely.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Card suit.
///
/// The derived order (clubs < diamonds < hearts < spades) is the tie-break
/// order used when scuttling between equal ranks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in tie-break order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// ASCII letter used in card codes.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    /// Unicode symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' | '♣' => Some(Suit::Clubs),
            'D' | '♦' => Some(Suit::Diamonds),
            'H' | '♥' => Some(Suit::Hearts),
            'S' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Card rank.
///
/// Ordering follows numeric value with the face cards above Ten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Point value for Ace through Ten.
    #[must_use]
    pub const fn value(self) -> Option<u32> {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => None,
            // Discriminants are 0-based.
            r => Some(r as u32 + 1),
        }
    }

    /// Short label used in card names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        let upper = label.to_ascii_uppercase();
        match upper.as_str() {
            "1" => Some(Rank::Ace),
            "T" => Some(Rank::Ten),
            _ => Self::ALL.into_iter().find(|r| r.label() == upper),
        }
    }
}

/// A playing card.
///
/// Serialises as its ASCII code (`"10H"`, `"QS"`) so cards can key maps in
/// JSON.
///
/// ## Example
///
/// ```
/// use cuttle_engine::cards::{Card, Rank, Suit};
///
/// let ten: Card = "10H".parse().unwrap();
/// assert_eq!(ten, Card::new(Rank::Ten, Suit::Hearts));
/// assert_eq!(ten.point_value(), Some(10));
/// assert_eq!(ten.to_string(), "10♥");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// ASCII code, e.g. `"10H"`.
    #[must_use]
    pub fn code(self) -> String {
        format!("{}{}", self.rank.label(), self.suit.letter())
    }

    /// Point value, if the card can score.
    #[must_use]
    pub const fn point_value(self) -> Option<u32> {
        self.rank.value()
    }

    /// Ace through Ten can be played for points.
    #[must_use]
    pub const fn can_be_point(self) -> bool {
        self.rank.value().is_some()
    }

    /// Ace, 2-7 and 9 have one-off effects.
    #[must_use]
    pub const fn can_be_one_off(self) -> bool {
        matches!(
            self.rank,
            Rank::Ace
                | Rank::Two
                | Rank::Three
                | Rank::Four
                | Rank::Five
                | Rank::Six
                | Rank::Seven
                | Rank::Nine
        )
    }

    /// 8, J, Q and K stay in play as permanents.
    #[must_use]
    pub const fn can_be_permanent(self) -> bool {
        matches!(self.rank, Rank::Eight | Rank::Jack | Rank::Queen | Rank::King)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Error parsing a card name such as `"10H"` or `"Q♠"`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised card name {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseCardError(s.to_string());
        let suit_char = trimmed.chars().last().ok_or_else(err)?;
        let suit = Suit::from_char(suit_char).ok_or_else(err)?;
        let rank_part = &trimmed[..trimmed.len() - suit_char.len_utf8()];
        let rank = Rank::from_label(rank_part).ok_or_else(err)?;
        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Can `attacker` scuttle `defender`?
///
/// Both must be point cards. Higher rank wins; equal ranks fall back to
/// suit order.
#[must_use]
pub fn can_scuttle(attacker: Card, defender: Card) -> bool {
    if !attacker.can_be_point() || !defender.can_be_point() {
        return false;
    }
    (attacker.rank, attacker.suit) > (defender.rank, defender.suit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_point_values() {
        assert_eq!(card("AC").point_value(), Some(1));
        assert_eq!(card("8D").point_value(), Some(8));
        assert_eq!(card("10S").point_value(), Some(10));
        assert_eq!(card("JS").point_value(), None);
        assert_eq!(card("KH").point_value(), None);
    }

    #[test]
    fn test_eligibility() {
        for rank in Rank::ALL {
            let c = Card::new(rank, Suit::Clubs);
            // Every card can be played some way.
            assert!(c.can_be_point() || c.can_be_one_off() || c.can_be_permanent());
        }
        assert!(card("8C").can_be_point());
        assert!(card("8C").can_be_permanent());
        assert!(!card("8C").can_be_one_off());
        assert!(card("9C").can_be_one_off());
        assert!(!card("10C").can_be_one_off());
        assert!(!card("QC").can_be_point());
    }

    #[test]
    fn test_scuttle_rank_dominates() {
        assert!(can_scuttle(card("9C"), card("8S")));
        assert!(!can_scuttle(card("8S"), card("9C")));
    }

    #[test]
    fn test_scuttle_suit_breaks_ties() {
        let order = ["5C", "5D", "5H", "5S"];
        for (i, lower) in order.iter().enumerate() {
            for higher in &order[i + 1..] {
                assert!(can_scuttle(card(higher), card(lower)));
                assert!(!can_scuttle(card(lower), card(higher)));
            }
        }
    }

    #[test]
    fn test_scuttle_requires_point_cards() {
        assert!(!can_scuttle(card("KS"), card("2C")));
        assert!(!can_scuttle(card("10S"), card("JC")));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(card("as"), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(card("Q♦"), Card::new(Rank::Queen, Suit::Diamonds));
        assert_eq!(card("TH"), Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(card("10H").to_string(), "10♥");
        assert!("ZZ".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&card("10H")).unwrap();
        assert_eq!(json, "\"10H\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card("10H"));
    }
}
