use std::fmt;
use std::str::FromStr;

use crate::direction::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyInput {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl KeyInput {
    pub fn direction(self) -> Direction {
        match self {
            KeyInput::ArrowUp => Direction::Up,
            KeyInput::ArrowDown => Direction::Down,
            KeyInput::ArrowLeft => Direction::Left,
            KeyInput::ArrowRight => Direction::Right,
        }
    }

    pub fn identifier(self) -> &'static str {
        match self {
            KeyInput::ArrowUp => "ArrowUp",
            KeyInput::ArrowDown => "ArrowDown",
            KeyInput::ArrowLeft => "ArrowLeft",
            KeyInput::ArrowRight => "ArrowRight",
        }
    }
}

impl From<Direction> for KeyInput {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => KeyInput::ArrowUp,
            Direction::Down => KeyInput::ArrowDown,
            Direction::Left => KeyInput::ArrowLeft,
            Direction::Right => KeyInput::ArrowRight,
        }
    }
}

impl FromStr for KeyInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" => Ok(KeyInput::ArrowUp),
            "ArrowDown" => Ok(KeyInput::ArrowDown),
            "ArrowLeft" => Ok(KeyInput::ArrowLeft),
            "ArrowRight" => Ok(KeyInput::ArrowRight),
            _ => Err(format!("Unknown key identifier: {}", s)),
        }
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Screen-space position of a touch, y grows downwards like the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Events an input source can push into a session. Touch events carry `None`
/// when the native payload had no touch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key(KeyInput),
    TouchStart(Option<TouchPoint>),
    TouchMove(Option<TouchPoint>),
    TouchEnd,
}

/// Turns a touch drag into a direction along its dominant axis.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    origin: Option<TouchPoint>,
    threshold_px: f32,
}

impl GestureTracker {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            origin: None,
            threshold_px: threshold_px.max(0.0),
        }
    }

    pub fn start(&mut self, point: Option<TouchPoint>) {
        self.origin = point;
    }

    pub fn end(&mut self) {
        self.origin = None;
    }

    pub fn track(&self, point: Option<TouchPoint>) -> Option<Direction> {
        let origin = self.origin?;
        let point = point?;

        let dx = point.x - origin.x;
        let dy = point.y - origin.y;
        if !dx.is_finite() || !dy.is_finite() {
            return None;
        }

        if dx.abs() > dy.abs() {
            if dx.abs() < self.threshold_px || dx == 0.0 {
                return None;
            }
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            if dy.abs() < self.threshold_px || dy == 0.0 {
                return None;
            }
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}
