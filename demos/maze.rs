//! Generate a seeded maze, solve it corner to corner and print it.
//!
//! Run: cargo run --bin maze -- [width] [height] [seed] [backtracker|prim]

use gridwalk_demos::{MazeArgs, solve_maze};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = MazeArgs::parse(std::env::args().skip(1))?;
    print!("{}", solve_maze(&args)?);
    Ok(())
}
