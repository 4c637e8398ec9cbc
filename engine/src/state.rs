use std::collections::HashSet;
use std::sync::Arc;

use crate::collision::DeathReason;
use crate::direction::Direction;
use crate::grid::{Cell, GridModel};

/// Immutable snake body, head first. A tick replaces the whole value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: Arc<[Cell]>,
}

impl Snake {
    pub fn single(cell: Cell) -> Self {
        Self { body: Arc::from([cell]) }
    }

    /// Checks the body is non-empty, in bounds and free of repeated cells.
    pub fn from_cells(cells: Vec<Cell>, grid: &GridModel) -> Result<Self, String> {
        if cells.is_empty() {
            return Err("Snake must have at least one cell".to_string());
        }
        let mut seen = HashSet::with_capacity(cells.len());
        for cell in &cells {
            if !grid.in_bounds(*cell) {
                return Err(format!("Snake cell {} is outside the grid", cell));
            }
            if !seen.insert(*cell) {
                return Err(format!("Snake cell {} appears twice", cell));
            }
        }
        Ok(Self { body: Arc::from(cells) })
    }

    pub(crate) fn from_body_unchecked(body: Vec<Cell>) -> Self {
        Self { body: Arc::from(body) }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(DeathReason),
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Frozen view of a game handed to renderers; cloning shares the body.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub grid: GridModel,
    pub snake: Snake,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub status: GameStatus,
    pub score: u32,
    pub tick: u64,
}

impl GameSnapshot {
    pub fn is_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    pub fn is_food(&self, cell: Cell) -> bool {
        self.food == Some(cell)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub reason: DeathReason,
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
}
