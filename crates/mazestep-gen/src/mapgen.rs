//! Random wall scattering.
//!
//! Every cell independently becomes a wall with a fixed probability; the
//! start and end are then put back so the maze always has both endpoints.
//! Nothing guarantees the end is reachable, which is what makes the result
//! interesting to search.

use mazestep_core::{Cell, CellKind, Grid};
use rand::{Rng, RngExt};

/// Wall probability used when none is given.
pub const DEFAULT_WALL_PROB: f64 = 0.28;

/// Maze generator driven by a caller-supplied RNG.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Refill `grid` with random walls.
    ///
    /// Each cell becomes a wall with probability `wall_prob`, otherwise free.
    /// The probability is clamped to `0.0..=1.0`, and NaN falls back to
    /// [`DEFAULT_WALL_PROB`]. The previous start is restored if it was set and
    /// its cell stayed free, else the start moves to the top-left corner; the
    /// end likewise falls back to the bottom-right corner.
    ///
    /// Returns the number of walls on the final grid.
    pub fn scatter_walls(&mut self, grid: &Grid, wall_prob: f64) -> usize {
        let p = if wall_prob.is_nan() {
            DEFAULT_WALL_PROB
        } else {
            wall_prob.clamp(0.0, 1.0)
        };
        let prev_start = grid.start();
        let prev_end = grid.end();

        for c in grid.bounds() {
            let kind = if self.rng.random_bool(p) {
                CellKind::Wall
            } else {
                CellKind::Free
            };
            grid.set(c, kind);
        }

        let Some(corner) = grid.bounds().last() else {
            return 0;
        };
        let keep = |prev: Option<Cell>| prev.filter(|&c| grid.get(c) == Some(CellKind::Free));
        let start = keep(prev_start).unwrap_or(Cell::ZERO);
        let end = keep(prev_end).unwrap_or(corner);
        grid.set(start, CellKind::Start);
        grid.set(end, CellKind::End);

        let walls = grid.snapshot().count(CellKind::Wall);
        log::debug!(
            "scattered {walls} walls on {} grid, start {start}, end {end}",
            grid.bounds()
        );
        walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn endpoints_fall_back_to_corners() {
        let grid = Grid::new(20, 30);
        seeded(1).scatter_walls(&grid, DEFAULT_WALL_PROB);
        assert_eq!(grid.start(), Some(Cell::new(0, 0)));
        assert_eq!(grid.end(), Some(Cell::new(19, 29)));
        assert_eq!(grid.get(Cell::new(0, 0)), Some(CellKind::Start));
        assert_eq!(grid.get(Cell::new(19, 29)), Some(CellKind::End));
    }

    #[test]
    fn full_probability_walls_everything_but_endpoints() {
        let grid = Grid::new(4, 5);
        let walls = seeded(2).scatter_walls(&grid, 1.0);
        assert_eq!(walls, 4 * 5 - 2);
    }

    #[test]
    fn zero_probability_keeps_existing_endpoints() {
        let grid = Grid::new(4, 4);
        grid.set(Cell::new(1, 1), CellKind::Start);
        grid.set(Cell::new(2, 3), CellKind::End);
        let walls = seeded(3).scatter_walls(&grid, 0.0);
        assert_eq!(walls, 0);
        assert_eq!(grid.start(), Some(Cell::new(1, 1)));
        assert_eq!(grid.end(), Some(Cell::new(2, 3)));
        let model = grid.snapshot();
        assert_eq!(model.count(CellKind::Start), 1);
        assert_eq!(model.count(CellKind::End), 1);
        assert_eq!(model.count(CellKind::Free), 14);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Grid::new(10, 10);
        let b = Grid::new(10, 10);
        seeded(42).scatter_walls(&a, 0.4);
        seeded(42).scatter_walls(&b, 0.4);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn mixed_probability_produces_mixed_maze() {
        let grid = Grid::new(30, 30);
        let walls = seeded(9).scatter_walls(&grid, 0.5);
        assert!(walls > 0);
        assert!(walls < 30 * 30 - 2);
    }

    #[test]
    fn nan_probability_uses_default() {
        let grid = Grid::new(3, 3);
        let walls = seeded(1).scatter_walls(&grid, f64::NAN);
        assert!(walls <= 3 * 3 - 2);
        assert_eq!(grid.start(), Some(Cell::new(0, 0)));
        assert_eq!(grid.end(), Some(Cell::new(2, 2)));

        let a = Grid::new(8, 8);
        let b = Grid::new(8, 8);
        seeded(4).scatter_walls(&a, f64::NAN);
        seeded(4).scatter_walls(&b, DEFAULT_WALL_PROB);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        let grid = Grid::new(3, 4);
        assert_eq!(seeded(6).scatter_walls(&grid, 7.5), 3 * 4 - 2);
        assert_eq!(seeded(6).scatter_walls(&grid, f64::NEG_INFINITY), 0);
    }

    #[test]
    fn empty_grid_is_left_alone() {
        let grid = Grid::new(0, 5);
        assert_eq!(seeded(5).scatter_walls(&grid, 0.5), 0);
        assert_eq!(grid.start(), None);
    }
}
