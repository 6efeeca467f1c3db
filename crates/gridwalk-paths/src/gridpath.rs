//! Shortest paths on a walkability map.

use gridwalk_core::Point;

use crate::PathRange;
use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, Walkable, WeightedPather};

/// Adapts a [`Walkable`] map into an [`AstarPather`]: 4-directional moves in
/// up, right, down, left order, unit cost, Manhattan estimate.
///
/// Moves onto blocked or out-of-bounds cells are never offered. A blocked
/// cell still lists its walkable neighbours, so a search can step off a
/// blocked start.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a, W: ?Sized> {
    grid: &'a W,
}

impl<'a, W: Walkable + ?Sized> GridPather<'a, W> {
    pub fn new(grid: &'a W) -> Self {
        Self { grid }
    }
}

impl<W: Walkable + ?Sized> Pather for GridPather<'_, W> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let bounds = self.grid.bounds();
        for np in p.neighbors_4() {
            if bounds.contains(np) && self.grid.is_walkable(np) {
                buf.push(np);
            }
        }
    }
}

impl<W: Walkable + ?Sized> WeightedPather for GridPather<'_, W> {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl<W: Walkable + ?Sized> AstarPather for GridPather<'_, W> {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// Find a shortest 4-directional path from `start` to `goal`.
///
/// The returned cells run from the neighbour of `start` up to and including
/// `goal`; `start` itself is left out, so `start == goal` gives an empty
/// path. Returns `None` when `goal` cannot be reached, including when either
/// endpoint is out of bounds or `goal` is blocked. Only the cells after
/// `start` must be walkable.
pub fn find_path<W: Walkable + ?Sized>(grid: &W, start: Point, goal: Point) -> Option<Vec<Point>> {
    let bounds = grid.bounds();
    if !bounds.contains(start) || !bounds.contains(goal) || !grid.is_walkable(goal) {
        return None;
    }
    let mut pr = PathRange::new(bounds);
    let mut path = pr.astar_path(&GridPather::new(grid), start, goal)?;
    path.remove(0);
    Some(path)
}

/// Whether `path` is a valid walk from `start`: every step moves to a
/// 4-adjacent, walkable cell. An empty path is trivially valid.
pub fn is_step_path<W: Walkable + ?Sized>(grid: &W, start: Point, path: &[Point]) -> bool {
    let mut prev = start;
    for &p in path {
        if !prev.is_adjacent(p) || !grid.is_walkable(p) {
            return false;
        }
        prev = p;
    }
    true
}
