use std::fmt;

use crate::grid::{Cell, GridModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathReason::WallCollision => f.write_str("wall collision"),
            DeathReason::SelfCollision => f.write_str("self collision"),
        }
    }
}

pub struct CollisionDetector {
    grid: GridModel,
}

impl CollisionDetector {
    pub fn new(grid: GridModel) -> Self {
        Self { grid }
    }

    /// `body` is the snake before this tick's tail is dropped, so stepping
    /// onto the current tail counts as a collision.
    pub fn check(&self, candidate_head: Cell, body: &[Cell]) -> Result<(), DeathReason> {
        if !self.grid.in_bounds(candidate_head) {
            return Err(DeathReason::WallCollision);
        }
        if body.contains(&candidate_head) {
            return Err(DeathReason::SelfCollision);
        }
        Ok(())
    }
}
