use gridwalk_core::{Grid, Point, Range};

/// Minimal pathfinding interface: provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    ///
    /// Neighbor order is significant: searches break ties by discovery order,
    /// so a deterministic order gives deterministic paths.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

/// A rectangular map of walkable and blocked cells.
pub trait Walkable {
    /// The cells the map covers.
    fn bounds(&self) -> Range;

    /// Whether `p` can be stepped on. Out-of-bounds points are never walkable.
    fn is_walkable(&self, p: Point) -> bool;
}

impl Walkable for Grid<bool> {
    #[inline]
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    #[inline]
    fn is_walkable(&self, p: Point) -> bool {
        self.at(p).unwrap_or(false)
    }
}

impl<W: Walkable + ?Sized> Walkable for &W {
    #[inline]
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    #[inline]
    fn is_walkable(&self, p: Point) -> bool {
        (**self).is_walkable(p)
    }
}
