//! Perfect-maze generation.
//!
//! Provides two carving algorithms:
//! - **Backtracker**: randomized depth-first search with an explicit stack.
//!   Produces long, winding corridors with few branches.
//! - **Prim**: randomized Prim over a frontier of candidate walls. Produces
//!   many short dead ends.
//!
//! Both carve a spanning tree over the cells: every cell is reachable and
//! there is exactly one route between any two of them. The random source is
//! only consulted to choose among candidates, so a seeded generator always
//! carves the same maze.

use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Direction, Point};
use rand::Rng;

use crate::error::MazeError;
use crate::maze::Maze;

/// Carving algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MazeAlgorithm {
    #[default]
    Backtracker,
    Prim,
}

impl fmt::Display for MazeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backtracker => f.write_str("backtracker"),
            Self::Prim => f.write_str("prim"),
        }
    }
}

impl FromStr for MazeAlgorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backtracker" | "dfs" => Ok(Self::Backtracker),
            "prim" => Ok(Self::Prim),
            _ => Err(MazeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Parameters for [`MazeGen::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    pub algorithm: MazeAlgorithm,
    /// Cell where carving begins. `None` means `(0, 0)` for the backtracker
    /// and a random cell for Prim.
    pub start: Option<Point>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            algorithm: MazeAlgorithm::Backtracker,
            start: None,
        }
    }
}

/// Maze generator driven by a random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a new maze as described by `cfg`.
    pub fn generate(&mut self, cfg: &MazeConfig) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(cfg.width, cfg.height)?;
        self.carve(&mut maze, cfg.algorithm, cfg.start)?;
        Ok(maze)
    }

    /// Reset `maze` to all walls and carve it in place.
    ///
    /// Returns the same maze for chaining.
    pub fn carve<'m>(
        &mut self,
        maze: &'m mut Maze,
        algorithm: MazeAlgorithm,
        start: Option<Point>,
    ) -> Result<&'m mut Maze, MazeError> {
        if let Some(s) = start {
            if !maze.bounds().contains(s) {
                return Err(MazeError::StartOutOfBounds {
                    start: s,
                    width: maze.width(),
                    height: maze.height(),
                });
            }
        }
        maze.reset();

        let carved = match algorithm {
            MazeAlgorithm::Backtracker => self.backtracker(maze, start.unwrap_or(Point::ZERO)),
            MazeAlgorithm::Prim => {
                let start = start.unwrap_or_else(|| {
                    // x is drawn before y.
                    let x = self.rng.random_range(0..maze.width());
                    let y = self.rng.random_range(0..maze.height());
                    Point::new(x, y)
                });
                self.prim(maze, start)
            }
        };

        log::debug!(
            "carved {}x{} maze with {algorithm}: {carved} passages",
            maze.width(),
            maze.height()
        );
        Ok(maze)
    }

    /// Randomized depth-first backtracker. Returns the number of walls removed.
    fn backtracker(&mut self, maze: &mut Maze, start: Point) -> usize {
        let mut visited = Visited::new(maze);
        let mut stack = vec![start];
        let mut candidates: Vec<Direction> = Vec::with_capacity(4);
        let mut carved = 0;
        visited.mark(start);

        while let Some(&current) = stack.last() {
            candidates.clear();
            candidates.extend(
                Direction::ALL
                    .into_iter()
                    .filter(|&d| visited.is_open(current.step(d))),
            );

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let dir = candidates[self.rng.random_range(0..candidates.len())];
            let next = current.step(dir);
            maze.carve(current, dir);
            visited.mark(next);
            stack.push(next);
            carved += 1;
        }

        carved
    }

    /// Randomized Prim. Returns the number of walls removed.
    fn prim(&mut self, maze: &mut Maze, start: Point) -> usize {
        let mut visited = Visited::new(maze);
        let mut frontier: Vec<(Point, Direction)> = Vec::new();
        let mut carved = 0;
        visited.mark(start);
        visited.push_boundary(start, &mut frontier);

        while !frontier.is_empty() {
            let i = self.rng.random_range(0..frontier.len());
            let (p, dir) = frontier.swap_remove(i);
            let next = p.step(dir);
            if !visited.is_open(next) {
                continue;
            }
            maze.carve(p, dir);
            visited.mark(next);
            visited.push_boundary(next, &mut frontier);
            carved += 1;
        }

        carved
    }
}

/// Generate a `width × height` maze with the backtracker, starting at `(0, 0)`.
pub fn generate_maze<R: Rng>(width: i32, height: i32, rng: &mut R) -> Result<Maze, MazeError> {
    MazeGen::new(rng).generate(&MazeConfig {
        width,
        height,
        ..MazeConfig::default()
    })
}

/// Generation-time visited flags.
struct Visited {
    flags: Vec<bool>,
    width: i32,
    height: i32,
}

impl Visited {
    fn new(maze: &Maze) -> Self {
        Self {
            flags: vec![false; maze.len()],
            width: maze.width(),
            height: maze.height(),
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Whether `p` is inside the maze and not yet visited.
    fn is_open(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| !self.flags[i])
    }

    fn mark(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            self.flags[i] = true;
        }
    }

    /// Queue the walls between `p` and its unvisited neighbours.
    fn push_boundary(&self, p: Point, frontier: &mut Vec<(Point, Direction)>) {
        for dir in Direction::ALL {
            if self.is_open(p.step(dir)) {
                frontier.push((p, dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALGORITHMS: [MazeAlgorithm; 2] = [MazeAlgorithm::Backtracker, MazeAlgorithm::Prim];

    fn seeded(algorithm: MazeAlgorithm, w: i32, h: i32, seed: u64) -> Maze {
        let mut mg = MazeGen::new(StdRng::seed_from_u64(seed));
        mg.generate(&MazeConfig {
            width: w,
            height: h,
            algorithm,
            start: None,
        })
        .unwrap()
    }

    /// Spanning tree: one connected component and exactly `cells - 1` edges.
    fn assert_perfect(m: &Maze) {
        assert_eq!(m.open_edges(), m.len() - 1);
        assert!(m.is_perfect());
        // Walls agree on both sides of every shared edge.
        for (p, _) in m.grid().iter() {
            for d in Direction::ALL {
                let q = p.step(d);
                if m.bounds().contains(q) {
                    assert_eq!(m.has_wall(p, d), m.has_wall(q, d.opposite()));
                } else {
                    assert!(m.has_wall(p, d), "outer wall open at {p} {d}");
                }
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        for algorithm in ALGORITHMS {
            let a = seeded(algorithm, 4, 4, 42);
            let b = seeded(algorithm, 4, 4, 42);
            assert_eq!(a, b);
            assert_eq!(a.layout_hash(), b.layout_hash());
        }
        let mut r1 = StdRng::seed_from_u64(42);
        let mut r2 = StdRng::seed_from_u64(42);
        assert_eq!(
            generate_maze(4, 4, &mut r1).unwrap(),
            generate_maze(4, 4, &mut r2).unwrap()
        );
    }

    #[test]
    fn different_seeds_differ() {
        for algorithm in ALGORITHMS {
            let a = seeded(algorithm, 10, 10, 1);
            let b = seeded(algorithm, 10, 10, 2);
            assert_ne!(a.layout_hash(), b.layout_hash());
        }
    }

    #[test]
    fn ten_by_ten_has_99_passages() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = generate_maze(10, 10, &mut rng).unwrap();
        assert_eq!(m.open_edges(), 99);
        assert_perfect(&m);
    }

    #[test]
    fn spanning_tree_over_many_seeds_and_shapes() {
        for seed in 0..40 {
            let w = 1 + (seed % 9) as i32;
            let h = 1 + (seed % 7) as i32;
            for algorithm in ALGORITHMS {
                assert_perfect(&seeded(algorithm, w, h, seed));
            }
        }
    }

    #[test]
    fn every_pair_of_cells_is_connected() {
        let m = seeded(MazeAlgorithm::Prim, 6, 5, 99);
        let cells: Vec<Point> = m.bounds().iter().collect();
        for &a in &cells {
            for &b in &cells {
                let path = m.path(a, b).unwrap();
                assert_eq!(path.is_empty(), a == b);
            }
        }
    }

    #[test]
    fn single_cell_and_corridor() {
        for algorithm in ALGORITHMS {
            let one = seeded(algorithm, 1, 1, 3);
            assert_eq!(one.open_edges(), 0);
            assert_eq!(one.walls_at(Point::ZERO), Some(crate::Walls::ALL));

            let row = seeded(algorithm, 5, 1, 3);
            assert_eq!(row.open_edges(), 4);
            assert_eq!(row.path(Point::new(0, 0), Point::new(4, 0)).map(|p| p.len()), Some(4));
        }
    }

    #[test]
    fn carve_in_place_resets_first() {
        let mut maze = Maze::new(6, 6).unwrap();
        let mut mg = MazeGen::new(StdRng::seed_from_u64(5));
        mg.carve(&mut maze, MazeAlgorithm::Backtracker, None).unwrap();
        let first = maze.clone();

        let mut mg = MazeGen::new(StdRng::seed_from_u64(5));
        let again = mg.carve(&mut maze, MazeAlgorithm::Backtracker, None).unwrap();
        assert_eq!(*again, first);
        assert_perfect(again);
    }

    #[test]
    fn explicit_start() {
        for algorithm in ALGORITHMS {
            let mut mg = MazeGen::new(StdRng::seed_from_u64(11));
            let m = mg
                .generate(&MazeConfig {
                    width: 5,
                    height: 4,
                    algorithm,
                    start: Some(Point::new(4, 3)),
                })
                .unwrap();
            assert_perfect(&m);
        }
    }

    #[test]
    fn rejects_bad_input() {
        let mut mg = MazeGen::new(StdRng::seed_from_u64(0));
        let bad_size = mg.generate(&MazeConfig {
            width: 0,
            ..MazeConfig::default()
        });
        assert!(matches!(bad_size, Err(MazeError::InvalidSize { .. })));

        let bad_start = mg.generate(&MazeConfig {
            width: 3,
            height: 3,
            start: Some(Point::new(3, 0)),
            ..MazeConfig::default()
        });
        assert!(matches!(bad_start, Err(MazeError::StartOutOfBounds { .. })));
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!("prim".parse::<MazeAlgorithm>(), Ok(MazeAlgorithm::Prim));
        assert_eq!("DFS".parse::<MazeAlgorithm>(), Ok(MazeAlgorithm::Backtracker));
        assert_eq!(
            "kruskal".parse::<MazeAlgorithm>(),
            Err(MazeError::UnknownAlgorithm("kruskal".into()))
        );
        for a in ALGORITHMS {
            assert_eq!(a.to_string().parse::<MazeAlgorithm>(), Ok(a));
        }
    }
}
