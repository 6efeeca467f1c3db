//! Pathfinding algorithms for 2D walkability grids.
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`], and the
//!   walkability-map wrapper [`find_path`])
//! - **Connected components** counting ([`PathRange::count_components`])
//!
//! A\* breaks ties between equally promising nodes by the order in which they
//! were discovered, so a query always returns the same path for the same
//! input.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | connected components |
//! | [`WeightedPather`] : [`Pather`] | (edge costs) |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`GridPather`] implements all three for any [`Walkable`] map.

mod astar;
mod cc;
mod distance;
mod gridpath;
mod pathrange;
mod traits;

pub use distance::manhattan;
pub use gridpath::{GridPather, find_path, is_step_path};
pub use pathrange::PathRange;
pub use traits::{AstarPather, Pather, Walkable, WeightedPather};
