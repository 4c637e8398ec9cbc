use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::direction::Direction;
use crate::food::FoodSpawnMode;
use crate::grid::{Cell, GridModel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u32,
    pub columns: u32,
    pub cell_pixel_size: u32,
    pub tick_interval_ms: u64,
    pub initial_direction: Direction,
    /// `None` samples a fresh cell on every start and reset.
    pub initial_food: Option<Cell>,
    pub food_spawn: FoodSpawnMode,
    pub gesture_threshold_px: f32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 20,
            cell_pixel_size: 20,
            tick_interval_ms: 200,
            initial_direction: Direction::Up,
            initial_food: Some(Cell::new(5, 5)),
            food_spawn: FoodSpawnMode::Unoccupied,
            gesture_threshold_px: 10.0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Result<GridModel, String> {
        GridModel::new(self.rows, self.columns)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Width and height in pixels of the rendered board.
    pub fn board_pixel_size(&self) -> (u64, u64) {
        let size = self.cell_pixel_size as u64;
        (self.columns as u64 * size, self.rows as u64 * size)
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        let grid = self.grid()?;
        if self.cell_pixel_size == 0 {
            return Err("Cell pixel size must be greater than 0".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("Tick interval must be greater than 0ms".to_string());
        }
        if !self.gesture_threshold_px.is_finite() || self.gesture_threshold_px < 0.0 {
            return Err(format!(
                "Gesture threshold must be a non-negative number, got {}",
                self.gesture_threshold_px
            ));
        }
        if let Some(food) = self.initial_food {
            if !grid.in_bounds(food) {
                return Err(format!(
                    "Initial food {} is outside the {}x{} grid; set initial_food to a cell inside it or to null for a random cell",
                    food, self.columns, self.rows
                ));
            }
            if food == grid.center() {
                return Err(format!(
                    "Initial food {} overlaps the starting snake; set initial_food to another cell or to null for a random cell",
                    food
                ));
            }
        }
        Ok(())
    }
}
