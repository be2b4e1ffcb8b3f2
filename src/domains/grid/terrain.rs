use super::grid::Grid;
use super::types::{CellState, Position, SURROUNDING};
use crate::common::{DomainError, DomainResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Scatters obstacle islands over an empty board.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGenerator {
    pub size: usize,
    pub num_islands: usize,
    pub min_island_size: usize,
    pub max_island_size: usize,
}

impl TerrainGenerator {
    pub fn new(size: usize, num_islands: usize, min_island_size: usize, max_island_size: usize) -> Self {
        Self {
            size,
            num_islands,
            min_island_size,
            max_island_size,
        }
    }

    /// Board for a scaling sweep: `size²/50` islands of 1 to 15 cells, so the
    /// obstacle density stays roughly constant as the board grows.
    pub fn scaled(size: usize) -> Self {
        Self::new(size, size * size / 50, 1, 15)
    }

    /// Each island starts at a random cell and grows by a random 8-connected
    /// walk. Walks may overlap, so islands can merge or come out smaller.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let mut grid = Grid::new(self.size);
        if self.size == 0 {
            return grid;
        }
        let lo = self.min_island_size.min(self.max_island_size);
        let hi = self.min_island_size.max(self.max_island_size);

        for _ in 0..self.num_islands {
            let cells = rng.gen_range(lo..=hi);
            let mut at = Position::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size));
            for _ in 0..cells {
                grid.set_cell(at, CellState::Obstacle);
                let (dr, dc) = SURROUNDING[rng.gen_range(0..SURROUNDING.len())];
                if let Some(next) = grid.offset(at, dr, dc) {
                    at = next;
                }
            }
        }
        grid
    }
}

/// Supplies one board per benchmark trial.
pub trait TerrainSource {
    fn next_grid(&mut self, rng: &mut StdRng) -> DomainResult<Grid>;
}

impl TerrainSource for TerrainGenerator {
    fn next_grid(&mut self, rng: &mut StdRng) -> DomainResult<Grid> {
        Ok(self.generate(rng))
    }
}

/// Replays the same board every trial.
#[derive(Debug, Clone)]
pub struct FixedMap {
    grid: Grid,
}

impl FixedMap {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }
}

impl TerrainSource for FixedMap {
    fn next_grid(&mut self, _rng: &mut StdRng) -> DomainResult<Grid> {
        Ok(self.grid.clone())
    }
}

/// Picks two distinct empty cells as start and goal.
pub fn pick_endpoints<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> DomainResult<(Position, Position)> {
    let empty = grid.empty_cells();
    let mut picked = empty.choose_multiple(rng, 2);
    match (picked.next(), picked.next()) {
        (Some(start), Some(goal)) => Ok((*start, *goal)),
        _ => Err(DomainError::InvalidMap {
            reason: format!("need two empty cells for start and goal, found {}", empty.len()),
        }),
    }
}
