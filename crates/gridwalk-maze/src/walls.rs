//! Per-cell wall bitmask.

use std::ops::{BitOr, Sub};

use gridwalk_core::Direction;

/// Bitmask of the walls standing around a maze cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls(pub u8);

impl Walls {
    pub const NONE: Self = Self(0);
    pub const TOP: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const BOTTOM: Self = Self(1 << 2);
    pub const LEFT: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    /// The single wall on side `dir`.
    #[inline]
    pub const fn side(dir: Direction) -> Self {
        match dir {
            Direction::Top => Self::TOP,
            Direction::Right => Self::RIGHT,
            Direction::Bottom => Self::BOTTOM,
            Direction::Left => Self::LEFT,
        }
    }

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the wall on side `dir` is standing.
    #[inline]
    pub const fn has(self, dir: Direction) -> bool {
        self.contains(Self::side(dir))
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of walls standing.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for Walls {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Sub for Walls {
    type Output = Self;
    /// Remove the walls in `rhs`.
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_partition_all() {
        let union = Direction::ALL
            .into_iter()
            .fold(Walls::NONE, |acc, d| acc | Walls::side(d));
        assert_eq!(union, Walls::ALL);
        assert_eq!(Walls::ALL.count(), 4);
    }

    #[test]
    fn remove_side() {
        let w = Walls::ALL - Walls::RIGHT;
        assert!(!w.has(Direction::Right));
        assert!(w.has(Direction::Left));
        assert_eq!(w.count(), 3);
        assert!((w - Walls::ALL).is_empty());
    }
}
