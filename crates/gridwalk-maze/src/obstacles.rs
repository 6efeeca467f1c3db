//! Random obstacle maps for pathfinding.

use gridwalk_core::{Grid, Point};
use rand::Rng;

use crate::error::MazeError;
use crate::mazegen::MazeGen;

/// Parameters for [`MazeGen::scatter_obstacles`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObstacleConfig {
    /// Fraction of all cells to block, in `[0, 1]`.
    pub rate: f64,
    /// Cells that must stay walkable (typically the player's spawn).
    pub keep_clear: Vec<Point>,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            rate: 0.3,
            keep_clear: vec![Point::ZERO],
        }
    }
}

impl<R: Rng> MazeGen<R> {
    /// Block `floor(cells * rate)` random walkable cells of `grid`, never
    /// touching `keep_clear`.
    ///
    /// The target is capped by the number of cells that can still be
    /// blocked. Returns the number of cells blocked.
    pub fn scatter_obstacles(
        &mut self,
        grid: &mut Grid<bool>,
        cfg: &ObstacleConfig,
    ) -> Result<usize, MazeError> {
        if !(0.0..=1.0).contains(&cfg.rate) {
            return Err(MazeError::InvalidRate(cfg.rate));
        }

        let available = grid.count_fn(|p, walkable| walkable && !cfg.keep_clear.contains(&p));
        let target = ((grid.len() as f64 * cfg.rate).floor() as usize).min(available);

        let mut placed = 0;
        while placed < target {
            let x = self.rng.random_range(0..grid.width());
            let y = self.rng.random_range(0..grid.height());
            let p = Point::new(x, y);
            if cfg.keep_clear.contains(&p) || grid.at(p) != Some(true) {
                continue;
            }
            grid.set(p, false);
            placed += 1;
        }

        log::debug!(
            "scattered {placed} obstacles over {}x{} grid",
            grid.width(),
            grid.height()
        );
        Ok(placed)
    }
}
