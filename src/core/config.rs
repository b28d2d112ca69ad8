//! Match configuration.
//!
//! `MatchConfig` fixes everything that is decided before the first card is
//! dealt: the shuffle seed, who deals, hand sizes, and the scoring table.

use serde::{Deserialize, Serialize};

use super::Side;

/// Default score needed to win with no Kings in play.
pub const DEFAULT_WIN_THRESHOLD: u32 = 21;

/// Consecutive passes that end the match in a draw.
pub const DEFAULT_PASS_LIMIT: u32 = 3;

/// Configuration for a single match.
///
/// ## Example
///
/// ```
/// use cuttle_engine::core::{MatchConfig, Side};
///
/// let config = MatchConfig::default()
///     .with_seed(7)
///     .with_dealer(Side::First);
///
/// assert_eq!(config.threshold_for_kings(0), 21);
/// assert_eq!(config.threshold_for_kings(1), 14);
/// assert_eq!(config.threshold_for_kings(9), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Shuffle seed.
    pub seed: u64,

    /// The dealing side. The other side takes the first turn.
    pub dealer: Side,

    /// Cards dealt to the dealer.
    pub dealer_hand: usize,

    /// Cards dealt to the non-dealer.
    pub non_dealer_hand: usize,

    /// Score needed to win with no Kings.
    pub win_threshold: u32,

    /// Threshold with 1, 2, 3, ... Kings in play. The last entry applies to
    /// any larger count.
    pub king_thresholds: Vec<u32>,

    /// Consecutive passes that end the match in a draw.
    pub pass_limit: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            dealer: Side::Second,
            dealer_hand: 6,
            non_dealer_hand: 5,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            king_thresholds: vec![14, 10, 7, 5],
            pass_limit: DEFAULT_PASS_LIMIT,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_dealer(mut self, dealer: Side) -> Self {
        self.dealer = dealer;
        self
    }

    pub fn with_win_threshold(mut self, threshold: u32) -> Self {
        self.win_threshold = threshold;
        self
    }

    pub fn with_king_thresholds(mut self, thresholds: Vec<u32>) -> Self {
        self.king_thresholds = thresholds;
        self
    }

    pub fn with_pass_limit(mut self, limit: u32) -> Self {
        self.pass_limit = limit;
        self
    }

    /// The side that moves first.
    #[must_use]
    pub fn first_player(&self) -> Side {
        self.dealer.opponent()
    }

    /// Win threshold for a side controlling `kings` Kings.
    #[must_use]
    pub fn threshold_for_kings(&self, kings: usize) -> u32 {
        if kings == 0 {
            return self.win_threshold;
        }
        self.king_thresholds
            .get(kings - 1)
            .or_else(|| self.king_thresholds.last())
            .copied()
            .unwrap_or(self.win_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.win_threshold, 21);
        assert_eq!(config.pass_limit, 3);
        assert_eq!(config.first_player(), Side::First);
    }

    #[test]
    fn test_king_table() {
        let config = MatchConfig::default();
        let thresholds: Vec<_> = (0..6).map(|k| config.threshold_for_kings(k)).collect();
        assert_eq!(thresholds, vec![21, 14, 10, 7, 5, 5]);
    }

    #[test]
    fn test_empty_king_table_keeps_default() {
        let config = MatchConfig::default().with_king_thresholds(vec![]);
        assert_eq!(config.threshold_for_kings(2), 21);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = MatchConfig::default().with_seed(5).with_pass_limit(4);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
