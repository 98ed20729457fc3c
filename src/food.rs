use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Random samples tried per grid cell before falling back to a full scan.
const SAMPLES_PER_CELL: usize = 4;

/// Picks food cells from an owned random source.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    /// Creates a deterministic spawner for tests and reproducible games.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a spawner seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Returns a free cell, or `None` when the snake fills the grid.
    pub fn spawn(&mut self, bounds: GridSize, snake: &Snake) -> Option<Position> {
        spawn_position(&mut self.rng, bounds, snake)
    }
}

/// Samples uniformly for a cell not occupied by the snake.
///
/// Rejection sampling is bounded; once it gives up the free cells are
/// enumerated and one is picked uniformly, so a crowded board never spins.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let total_cells = bounds.total_cells();
    if snake.len() >= total_cells {
        return None;
    }

    for _ in 0..total_cells * SAMPLES_PER_CELL {
        let position = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(position) {
            return Some(position);
        }
    }

    let candidates: Vec<Position> = bounds
        .cells()
        .filter(|position| !snake.occupies(*position))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}
