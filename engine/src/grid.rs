use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A grid coordinate. Signed so that a head stepping off the board is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridModel {
    rows: u32,
    columns: u32,
}

impl GridModel {
    pub fn new(rows: u32, columns: u32) -> Result<Self, String> {
        if rows == 0 {
            return Err("Grid must have at least one row".to_string());
        }
        if columns == 0 {
            return Err("Grid must have at least one column".to_string());
        }
        if rows > i32::MAX as u32 || columns > i32::MAX as u32 {
            return Err(format!("Grid {}x{} is too large", columns, rows));
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.columns && (cell.y as u32) < self.rows
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.columns / 2) as i32, (self.rows / 2) as i32)
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let columns = self.columns as i32;
        let rows = self.rows as i32;
        (0..rows).flat_map(move |y| (0..columns).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(GridModel::new(0, 20).is_err());
        assert!(GridModel::new(20, 0).is_err());
        assert!(GridModel::new(1, 1).is_ok());
    }

    #[test]
    fn test_in_bounds_edges() {
        let grid = GridModel::new(20, 30).unwrap();
        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(29, 19)));
        assert!(!grid.in_bounds(Cell::new(30, 19)));
        assert!(!grid.in_bounds(Cell::new(29, 20)));
        assert!(!grid.in_bounds(Cell::new(-1, 10)));
        assert!(!grid.in_bounds(Cell::new(10, -1)));
    }

    #[test]
    fn test_center_of_default_grid() {
        let grid = GridModel::new(20, 20).unwrap();
        assert_eq!(grid.center(), Cell::new(10, 10));
    }

    #[test]
    fn test_cells_cover_whole_grid_in_row_major_order() {
        let grid = GridModel::new(2, 3).unwrap();
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(2, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
        assert!(cells.iter().all(|c| grid.in_bounds(*c)));
    }

    #[test]
    fn test_step_and_distance() {
        let cell = Cell::new(10, 10);
        assert_eq!(cell.step(Direction::Up), Cell::new(10, 9));
        assert_eq!(cell.step(Direction::Left), Cell::new(9, 10));
        assert_eq!(cell.manhattan_distance(Cell::new(5, 5)), 10);
    }
}
