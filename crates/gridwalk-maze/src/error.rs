use std::fmt;

use gridwalk_core::Point;

/// Errors from maze and obstacle-map generation.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// Width or height below 1.
    InvalidSize { width: i32, height: i32 },
    /// A configured start cell lies outside the grid.
    StartOutOfBounds { start: Point, width: i32, height: i32 },
    /// Obstacle rate outside `[0, 1]` (or not a number).
    InvalidRate(f64),
    /// An algorithm name that does not parse.
    UnknownAlgorithm(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "maze: invalid size {width}x{height} (both must be at least 1)")
            }
            Self::StartOutOfBounds {
                start,
                width,
                height,
            } => write!(f, "maze: start {start} outside {width}x{height} grid"),
            Self::InvalidRate(rate) => {
                write!(f, "obstacles: rate {rate} not within [0, 1]")
            }
            Self::UnknownAlgorithm(name) => {
                write!(f, "maze: unknown algorithm {name:?}")
            }
        }
    }
}

impl std::error::Error for MazeError {}
