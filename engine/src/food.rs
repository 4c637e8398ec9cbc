use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, GridModel};
use crate::rng::SessionRng;

const SAMPLE_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodSpawnMode {
    /// Sample only cells the snake does not cover.
    #[default]
    Unoccupied,
    /// Sample the whole board; food may land inside the snake.
    Legacy,
}

pub struct FoodSpawner {
    grid: GridModel,
    mode: FoodSpawnMode,
}

impl FoodSpawner {
    pub fn new(grid: GridModel, mode: FoodSpawnMode) -> Self {
        Self { grid, mode }
    }

    pub fn mode(&self) -> FoodSpawnMode {
        self.mode
    }

    /// Returns `None` only in `Unoccupied` mode when every cell is taken.
    pub fn spawn(&self, occupied: &[Cell], rng: &mut SessionRng) -> Option<Cell> {
        match self.mode {
            FoodSpawnMode::Legacy => Some(self.random_cell(rng)),
            FoodSpawnMode::Unoccupied => self.spawn_unoccupied(occupied, rng),
        }
    }

    fn spawn_unoccupied(&self, occupied: &[Cell], rng: &mut SessionRng) -> Option<Cell> {
        let taken: HashSet<Cell> = occupied
            .iter()
            .copied()
            .filter(|cell| self.grid.in_bounds(*cell))
            .collect();

        let free_count = self.grid.cell_count() - taken.len();
        if free_count == 0 {
            return None;
        }

        for _ in 0..SAMPLE_ATTEMPTS {
            let cell = self.random_cell(rng);
            if !taken.contains(&cell) {
                return Some(cell);
            }
        }

        // Nearly full board: pick directly among the remaining free cells.
        let target = rng.random_range(0..free_count);
        self.grid
            .cells()
            .filter(|cell| !taken.contains(cell))
            .nth(target)
    }

    fn random_cell(&self, rng: &mut SessionRng) -> Cell {
        let x = rng.random_range(0..self.grid.columns()) as i32;
        let y = rng.random_range(0..self.grid.rows()) as i32;
        Cell::new(x, y)
    }
}
