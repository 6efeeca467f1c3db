//! Text demos shared by the `maze` and `obstacles` binaries.
//!
//! Each demo turns its arguments into a printable report so the binaries
//! stay thin and the output can be checked in tests.

use std::fmt;

use gridwalk_core::{Grid, Point};
use gridwalk_maze::{MazeAlgorithm, MazeConfig, MazeError, MazeGen, ObstacleConfig};
use gridwalk_paths::find_path;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Errors from argument parsing or generation.
#[derive(Debug)]
pub enum DemoError {
    BadArg { name: &'static str, value: String },
    Maze(MazeError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadArg { name, value } => write!(f, "invalid {name}: {value:?}"),
            Self::Maze(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Maze(e) => Some(e),
            Self::BadArg { .. } => None,
        }
    }
}

impl From<MazeError> for DemoError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}

fn parse_arg<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, DemoError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| DemoError::BadArg { name, value: v }),
    }
}

// ---------------------------------------------------------------------------
// Maze demo
// ---------------------------------------------------------------------------

/// Positional arguments: `[width] [height] [seed] [algorithm]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeArgs {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub algorithm: MazeAlgorithm,
}

impl Default for MazeArgs {
    fn default() -> Self {
        Self {
            width: 12,
            height: 8,
            seed: 42,
            algorithm: MazeAlgorithm::Backtracker,
        }
    }
}

impl MazeArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, DemoError> {
        let d = Self::default();
        let mut it = args.into_iter();
        Ok(Self {
            width: parse_arg("width", it.next(), d.width)?,
            height: parse_arg("height", it.next(), d.height)?,
            seed: parse_arg("seed", it.next(), d.seed)?,
            algorithm: parse_arg("algorithm", it.next(), d.algorithm)?,
        })
    }
}

/// Generate the maze described by `args`, solve it from the top-left to the
/// bottom-right cell and render both.
pub fn solve_maze(args: &MazeArgs) -> Result<String, DemoError> {
    let mut mg = MazeGen::new(StdRng::seed_from_u64(args.seed));
    let maze = mg.generate(&MazeConfig {
        width: args.width,
        height: args.height,
        algorithm: args.algorithm,
        start: None,
    })?;

    let start = Point::ZERO;
    let goal = Point::new(args.width - 1, args.height - 1);
    let mut route = vec![start];
    let steps = match maze.path(start, goal) {
        Some(path) => {
            let n = path.len();
            route.extend(path);
            n
        }
        None => 0,
    };

    let mut out = format!(
        "{}x{} {} maze, seed {} (layout {:016x})\n",
        args.width,
        args.height,
        args.algorithm,
        args.seed,
        maze.layout_hash()
    );
    out.push_str(&maze.render_with_path(&route));
    out.push_str(&format!(
        "{start} -> {goal}: {steps} steps, {} dead ends\n",
        maze.dead_ends()
    ));
    Ok(out)
}

// ---------------------------------------------------------------------------
// Obstacle demo
// ---------------------------------------------------------------------------

/// Positional arguments: `[size] [seed]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleArgs {
    pub size: i32,
    pub seed: u64,
}

impl Default for ObstacleArgs {
    fn default() -> Self {
        Self { size: 10, seed: 42 }
    }
}

impl ObstacleArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, DemoError> {
        let d = Self::default();
        let mut it = args.into_iter();
        Ok(Self {
            size: parse_arg("size", it.next(), d.size)?,
            seed: parse_arg("seed", it.next(), d.seed)?,
        })
    }
}

/// Scatter obstacles over a `size × size` field and path from the top-left
/// to the bottom-right corner.
///
/// Legend: `@` start, `*` path, `#` obstacle, `.` floor.
pub fn obstacle_field(args: &ObstacleArgs) -> Result<String, DemoError> {
    let mut grid = Grid::filled(args.size, args.size, true);
    let start = Point::ZERO;
    let goal = Point::new(args.size - 1, args.size - 1);
    let cfg = ObstacleConfig {
        keep_clear: vec![start, goal],
        ..ObstacleConfig::default()
    };
    let mut mg = MazeGen::new(StdRng::seed_from_u64(args.seed));
    let placed = mg.scatter_obstacles(&mut grid, &cfg)?;
    let path = find_path(&grid, start, goal);

    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let c = if p == start {
                '@'
            } else if path.as_ref().is_some_and(|path| path.contains(&p)) {
                '*'
            } else if grid.at(p) == Some(true) {
                '.'
            } else {
                '#'
            };
            out.push(c);
        }
        out.push('\n');
    }
    let outcome = match &path {
        Some(path) => format!("{} steps", path.len()),
        None => "no path".to_string(),
    };
    out.push_str(&format!("{placed} obstacles, {start} -> {goal}: {outcome}\n"));
    Ok(out)
}
