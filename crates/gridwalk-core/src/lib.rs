//! **gridwalk-core**: geometry primitives and dense grid storage.
//!
//! Everything else in the *gridwalk* workspace is built on the types here:
//! [`Point`] and [`Range`] for coordinates, [`Direction`] for the four
//! cardinal moves, and [`Grid`] for row-major per-cell data.

pub mod geom;
pub mod grid;

pub use geom::{Direction, Point, Range, RangeIter};
pub use grid::{Grid, GridIter};
