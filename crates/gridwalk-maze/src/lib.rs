//! Seeded map generation for gridwalk: perfect mazes and obstacle fields.
//!
//! Every generator here takes its randomness from a caller-supplied
//! [`rand::Rng`]; hand it a seeded generator (for example
//! `StdRng::seed_from_u64`) and the output is reproducible.

pub mod error;
pub mod maze;
pub mod mazegen;
pub mod obstacles;
pub mod walls;

pub use error::MazeError;
pub use maze::Maze;
pub use mazegen::{MazeAlgorithm, MazeConfig, MazeGen, generate_maze};
pub use obstacles::ObstacleConfig;
pub use walls::Walls;
