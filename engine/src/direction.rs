use serde::{Deserialize, Serialize};

use crate::input::{GestureTracker, InputEvent, KeyInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector in grid space; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Holds the direction applied on the last tick and the single pending slot
/// that the next tick will latch. Requests only ever write the pending slot.
#[derive(Clone, Debug)]
pub struct DirectionController {
    applied: Direction,
    pending: Direction,
    gesture: GestureTracker,
}

impl DirectionController {
    pub fn new(initial: Direction, gesture_threshold_px: f32) -> Self {
        Self {
            applied: initial,
            pending: initial,
            gesture: GestureTracker::new(gesture_threshold_px),
        }
    }

    /// Stores `requested` unless it reverses the applied direction.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(&self.applied) {
            return false;
        }
        self.pending = requested;
        true
    }

    /// Arrow keys only turn onto the axis the snake is not already moving along,
    /// which drops both reversals and no-op presses.
    pub fn request_key(&mut self, key: KeyInput) -> bool {
        let requested = key.direction();
        let (dx, dy) = self.applied.delta();
        let perpendicular_is_zero = if requested.is_horizontal() { dx == 0 } else { dy == 0 };
        if !perpendicular_is_zero {
            return false;
        }
        self.request_direction(requested)
    }

    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.request_key(key),
            InputEvent::TouchStart(point) => {
                self.gesture.start(point);
                false
            }
            InputEvent::TouchMove(point) => match self.gesture.track(point) {
                Some(direction) => self.request_direction(direction),
                None => false,
            },
            InputEvent::TouchEnd => {
                self.gesture.end();
                false
            }
        }
    }

    pub fn current_direction(&self) -> Direction {
        self.pending
    }

    pub fn applied_direction(&self) -> Direction {
        self.applied
    }

    /// Consumes the pending slot at the start of a tick.
    pub fn latch(&mut self) -> Direction {
        self.applied = self.pending;
        self.applied
    }
}
