//! The carved maze and its queries.

use std::fmt;

use gridwalk_core::{Direction, Grid, Point, Range};
use gridwalk_paths::{AstarPather, PathRange, Pather, WeightedPather, manhattan};

use crate::error::MazeError;
use crate::walls::Walls;

/// A rectangular maze: one [`Walls`] mask per cell.
///
/// Walls are kept consistent on both sides of every shared edge, so
/// `has_wall(p, Right)` always agrees with `has_wall(p + (1, 0), Left)`.
/// Outer boundary walls are never removed. Deserializing (with the `serde`
/// feature) rejects data that breaks either rule or has no cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Maze {
    cells: Grid<Walls>,
}

impl Maze {
    /// A maze with every wall standing.
    pub fn new(width: i32, height: i32) -> Result<Self, MazeError> {
        if width < 1 || height < 1 {
            return Err(MazeError::InvalidSize { width, height });
        }
        Ok(Self {
            cells: Grid::filled(width, height, Walls::ALL),
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.cells.bounds()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a maze has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying wall grid.
    #[inline]
    pub fn grid(&self) -> &Grid<Walls> {
        &self.cells
    }

    /// Walls around `p`, or `None` outside the maze.
    #[inline]
    pub fn walls_at(&self, p: Point) -> Option<Walls> {
        self.cells.at(p)
    }

    /// Whether the wall on side `dir` of `p` stands. Points outside the maze
    /// are solid.
    #[inline]
    pub fn has_wall(&self, p: Point, dir: Direction) -> bool {
        self.walls_at(p).is_none_or(|w| w.has(dir))
    }

    /// Whether one can step from `p` in direction `dir`.
    #[inline]
    pub fn is_open(&self, p: Point, dir: Direction) -> bool {
        !self.has_wall(p, dir)
    }

    /// Put every wall back.
    pub fn reset(&mut self) {
        self.cells.fill(Walls::ALL);
    }

    /// Knock down the wall between `p` and its neighbour in `dir`, on both
    /// sides. Returns `false` if either cell lies outside the maze.
    pub fn carve(&mut self, p: Point, dir: Direction) -> bool {
        let np = p.step(dir);
        if !self.cells.contains(p) || !self.cells.contains(np) {
            return false;
        }
        if let Some(w) = self.cells.at_mut(p) {
            *w = *w - Walls::side(dir);
        }
        if let Some(w) = self.cells.at_mut(np) {
            *w = *w - Walls::side(dir.opposite());
        }
        true
    }

    /// Number of open passages, each shared edge counted once.
    pub fn open_edges(&self) -> usize {
        self.cells
            .iter()
            .map(|(p, w)| {
                let right = p.x + 1 < self.width() && !w.has(Direction::Right);
                let bottom = p.y + 1 < self.height() && !w.has(Direction::Bottom);
                usize::from(right) + usize::from(bottom)
            })
            .sum()
    }

    /// Cells reachable in one step from `p`, in direction order.
    pub fn passages(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors(p, &mut buf);
        buf
    }

    /// Number of cells with exactly one way out.
    pub fn dead_ends(&self) -> usize {
        self.cells.count_fn(|_, w| w.count() == 3)
    }

    /// Whether the passages form a spanning tree: every cell reachable from
    /// every other along exactly one route.
    pub fn is_perfect(&self) -> bool {
        self.open_edges() + 1 == self.len()
            && PathRange::new(self.bounds()).count_components(self) == 1
    }

    /// A 64-bit FNV-1a fingerprint of the wall layout.
    ///
    /// Equal mazes always hash equal, which makes the value handy for
    /// checking that a seed reproduces the same layout.
    pub fn layout_hash(&self) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0100_0000_01b3;
        let dims = [self.width().to_le_bytes(), self.height().to_le_bytes()];
        let bytes = dims
            .iter()
            .flatten()
            .copied()
            .chain(self.cells.as_slice().iter().map(|w| w.0));
        bytes.fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME))
    }

    /// The first side, in row-major then direction order, whose wall is
    /// unknown, disagrees with the cell across it, or opens onto the
    /// outside. Carving never produces one.
    #[cfg(feature = "serde")]
    fn stray_wall(&self) -> Option<(Point, Direction)> {
        self.cells.iter().find_map(|(p, w)| {
            if !Walls::ALL.contains(w) {
                return Some((p, Direction::Top));
            }
            Direction::ALL.into_iter().find_map(|d| {
                let across = match self.walls_at(p.step(d)) {
                    Some(n) => n.has(d.opposite()),
                    None => true,
                };
                (w.has(d) != across).then_some((p, d))
            })
        })
    }

    /// A shortest route between two cells along open passages, excluding
    /// `from` and including `to`. In a perfect maze this is the only route.
    pub fn path(&self, from: Point, to: Point) -> Option<Vec<Point>> {
        let mut pr = PathRange::new(self.bounds());
        let mut path = pr.astar_path(self, from, to)?;
        path.remove(0);
        Some(path)
    }

    /// Position of cell `p` in the grid produced by [`to_walk_grid`](Self::to_walk_grid).
    #[inline]
    pub fn cell_to_grid(p: Point) -> Point {
        Point::new(2 * p.x + 1, 2 * p.y + 1)
    }

    /// Expand into a `(2w+1) × (2h+1)` walkability grid: cells and open
    /// passages are walkable, walls and wall corners are not.
    pub fn to_walk_grid(&self) -> Grid<bool> {
        let mut grid = Grid::filled(2 * self.width() + 1, 2 * self.height() + 1, false);
        for (p, w) in self.cells.iter() {
            let c = Self::cell_to_grid(p);
            grid.set(c, true);
            if !w.has(Direction::Right) {
                grid.set(c.step(Direction::Right), true);
            }
            if !w.has(Direction::Bottom) {
                grid.set(c.step(Direction::Bottom), true);
            }
        }
        grid
    }

    /// ASCII drawing of the maze, with `*` on the cells of `path`.
    pub fn render_with_path(&self, path: &[Point]) -> String {
        let mut out = String::new();
        for x in 0..self.width() {
            let top = self.has_wall(Point::new(x, 0), Direction::Top);
            out.push('+');
            out.push_str(if top { "---" } else { "   " });
        }
        out.push_str("+\n");
        for y in 0..self.height() {
            let left = self.has_wall(Point::new(0, y), Direction::Left);
            out.push(if left { '|' } else { ' ' });
            for x in 0..self.width() {
                let p = Point::new(x, y);
                out.push_str(if path.contains(&p) { " * " } else { "   " });
                out.push(if self.has_wall(p, Direction::Right) { '|' } else { ' ' });
            }
            out.push('\n');
            for x in 0..self.width() {
                let bottom = self.has_wall(Point::new(x, y), Direction::Bottom);
                out.push('+');
                out.push_str(if bottom { "---" } else { "   " });
            }
            out.push_str("+\n");
        }
        out
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Maze {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct Raw {
            cells: Grid<Walls>,
        }

        let Raw { cells } = Raw::deserialize(deserializer)?;
        if cells.is_empty() {
            return Err(D::Error::custom(MazeError::InvalidSize {
                width: cells.width(),
                height: cells.height(),
            }));
        }
        let maze = Self { cells };
        match maze.stray_wall() {
            Some((p, dir)) => Err(D::Error::custom(format!(
                "maze: wall {dir} of {p} does not match its neighbour"
            ))),
            None => Ok(maze),
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with_path(&[]))
    }
}

impl Pather for Maze {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let Some(w) = self.walls_at(p) else {
            return;
        };
        for dir in Direction::ALL {
            if !w.has(dir) {
                buf.push(p.step(dir));
            }
        }
    }
}

impl WeightedPather for Maze {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Maze {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_paths::{find_path, is_step_path};

    /// 3×2 maze carved by hand into an S shape:
    ///
    /// ```text
    /// (0,0)-(1,0)-(2,0)
    ///                |
    /// (0,1)-(1,1)-(2,1)
    /// ```
    fn s_maze() -> Maze {
        let mut m = Maze::new(3, 2).unwrap();
        assert!(m.carve(Point::new(0, 0), Direction::Right));
        assert!(m.carve(Point::new(1, 0), Direction::Right));
        assert!(m.carve(Point::new(2, 0), Direction::Bottom));
        assert!(m.carve(Point::new(2, 1), Direction::Left));
        assert!(m.carve(Point::new(1, 1), Direction::Left));
        m
    }

    #[test]
    fn new_has_all_walls() {
        let m = Maze::new(4, 3).unwrap();
        assert_eq!(m.len(), 12);
        assert!(m.grid().iter().all(|(_, w)| w == Walls::ALL));
        assert_eq!(m.open_edges(), 0);
        assert_eq!(m.dead_ends(), 0);
    }

    #[test]
    fn invalid_size() {
        assert_eq!(
            Maze::new(0, 5),
            Err(MazeError::InvalidSize {
                width: 0,
                height: 5
            })
        );
        assert!(Maze::new(3, -1).is_err());
    }

    #[test]
    fn carve_updates_both_sides() {
        let mut m = Maze::new(2, 2).unwrap();
        assert!(m.carve(Point::new(1, 1), Direction::Top));
        assert!(m.is_open(Point::new(1, 1), Direction::Top));
        assert!(m.is_open(Point::new(1, 0), Direction::Bottom));
        assert!(m.has_wall(Point::new(1, 0), Direction::Left));
        assert_eq!(m.open_edges(), 1);
    }

    #[test]
    fn boundary_walls_cannot_be_carved() {
        let mut m = Maze::new(2, 2).unwrap();
        assert!(!m.carve(Point::new(0, 0), Direction::Left));
        assert!(!m.carve(Point::new(1, 1), Direction::Bottom));
        assert!(!m.carve(Point::new(5, 5), Direction::Top));
        assert!(m.has_wall(Point::new(0, 0), Direction::Left));
        assert!(m.has_wall(Point::new(-1, 0), Direction::Right));
    }

    #[test]
    fn queries_on_hand_carved_maze() {
        let m = s_maze();
        assert_eq!(m.open_edges(), 5);
        assert_eq!(m.dead_ends(), 2);
        assert_eq!(m.passages(Point::new(2, 0)), vec![Point::new(2, 1), Point::new(1, 0)]);
        assert_eq!(m.passages(Point::new(9, 9)), Vec::<Point>::new());
    }

    #[test]
    fn perfect_only_for_spanning_trees() {
        assert!(s_maze().is_perfect());
        assert!(Maze::new(1, 1).unwrap().is_perfect());
        assert!(!Maze::new(2, 1).unwrap().is_perfect());

        // (1,1) still walled off, then a loop.
        let mut m = Maze::new(2, 2).unwrap();
        m.carve(Point::ZERO, Direction::Right);
        m.carve(Point::ZERO, Direction::Bottom);
        assert!(!m.is_perfect());
        m.carve(Point::new(1, 0), Direction::Bottom);
        assert!(m.is_perfect());
        m.carve(Point::new(0, 1), Direction::Right);
        assert!(!m.is_perfect());
    }

    #[test]
    fn path_follows_passages() {
        let m = s_maze();
        let path = m.path(Point::new(0, 0), Point::new(0, 1)).unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(1, 1),
                Point::new(0, 1),
            ]
        );
        assert_eq!(Maze::new(2, 2).unwrap().path(Point::ZERO, Point::new(1, 1)), None);
    }

    #[test]
    fn walk_grid_matches_maze_paths() {
        let m = s_maze();
        let grid = m.to_walk_grid();
        assert_eq!(grid.size(), Point::new(7, 5));
        // Border stays solid.
        assert!(
            grid.bounds()
                .iter()
                .filter(|p| p.x == 0 || p.y == 0)
                .all(|p| grid.at(p) == Some(false))
        );
        let from = Maze::cell_to_grid(Point::new(0, 0));
        let to = Maze::cell_to_grid(Point::new(0, 1));
        let path = find_path(&grid, from, to).unwrap();
        assert_eq!(path.len(), 10);
        assert!(is_step_path(&grid, from, &path));
    }

    #[test]
    fn render_ascii() {
        let mut m = Maze::new(2, 1).unwrap();
        m.carve(Point::new(0, 0), Direction::Right);
        assert_eq!(m.to_string(), "+---+---+\n|       |\n+---+---+\n");
        assert_eq!(
            m.render_with_path(&[Point::new(1, 0)]),
            "+---+---+\n|     * |\n+---+---+\n"
        );
    }

    #[test]
    fn layout_hash_tracks_walls_and_shape() {
        let a = Maze::new(2, 3).unwrap();
        let b = Maze::new(3, 2).unwrap();
        assert_ne!(a.layout_hash(), b.layout_hash());
        let mut c = a.clone();
        assert_eq!(a.layout_hash(), c.layout_hash());
        c.carve(Point::ZERO, Direction::Right);
        assert_ne!(a.layout_hash(), c.layout_hash());
        c.reset();
        assert_eq!(a, c);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn maze_round_trip() {
        let mut m = Maze::new(3, 3).unwrap();
        m.carve(Point::new(1, 1), Direction::Left);
        let json = serde_json::to_string(&m).unwrap();
        let back: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.layout_hash(), m.layout_hash());
    }

    #[test]
    fn rejects_inconsistent_payloads() {
        // Cell count does not fill the grid.
        let short = r#"{"cells":{"cells":[],"width":3,"height":3}}"#;
        assert!(serde_json::from_str::<Maze>(short).is_err());
        // No cells at all.
        let empty = r#"{"cells":{"cells":[],"width":0,"height":0}}"#;
        let err = serde_json::from_str::<Maze>(empty).unwrap_err();
        assert!(err.to_string().contains("invalid size 0x0"));
        // Right wall of (0,0) open but left wall of (1,0) standing.
        let one_sided = r#"{"cells":{"cells":[13,15],"width":2,"height":1}}"#;
        assert!(serde_json::from_str::<Maze>(one_sided).is_err());
        // Outer wall missing.
        let leaky = r#"{"cells":{"cells":[7],"width":1,"height":1}}"#;
        assert!(serde_json::from_str::<Maze>(leaky).is_err());
        // Bits outside the four sides.
        let stray = r#"{"cells":{"cells":[31],"width":1,"height":1}}"#;
        assert!(serde_json::from_str::<Maze>(stray).is_err());
    }
}
