//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! Cuttle is strictly two-player, so a side is one of two values rather
//! than an open-ended index. `Side::opponent` is the only navigation needed.
//!
//! ## SideMap
//!
//! Per-side data storage backed by a two-element array for O(1) access.
//! Supports iteration and indexing by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
///
/// `Side::First` and `Side::Second` are seat labels only; which of them
/// deals is decided by [`MatchConfig::dealer`](crate::core::MatchConfig).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Both sides in seat order.
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Iterate over both sides in seat order.
    ///
    /// ```
    /// use cuttle_engine::core::Side;
    ///
    /// let sides: Vec<_> = Side::all().collect();
    /// assert_eq!(sides, vec![Side::First, Side::Second]);
    /// ```
    pub fn all() -> impl Iterator<Item = Side> {
        Self::BOTH.into_iter()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "Player 1"),
            Side::Second => write!(f, "Player 2"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use cuttle_engine::core::{Side, SideMap};
///
/// let mut score: SideMap<u32> = SideMap::with_value(0);
/// score[Side::Second] = 7;
///
/// assert_eq!(score[Side::First], 0);
/// assert_eq!(score[Side::Second], 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::First), factory(Side::Second)],
        }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::BOTH.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
