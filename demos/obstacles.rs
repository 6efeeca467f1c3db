//! Scatter seeded obstacles over a grid and path across it.
//!
//! Run: cargo run --bin obstacles -- [size] [seed]

use gridwalk_demos::{ObstacleArgs, obstacle_field};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ObstacleArgs::parse(std::env::args().skip(1))?;
    print!("{}", obstacle_field(&args)?);
    Ok(())
}
