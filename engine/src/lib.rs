pub mod logger;
pub mod config;

pub mod bot_controller;
pub mod collision;
pub mod direction;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod rng;
pub mod session;
pub mod simulation;
pub mod state;

pub use bot_controller::BotController;
pub use collision::{CollisionDetector, DeathReason};
pub use config::GameConfig;
pub use direction::{Direction, DirectionController};
pub use food::{FoodSpawnMode, FoodSpawner};
pub use game::{SnakeGame, TickEvent};
pub use grid::{Cell, GridModel};
pub use input::{GestureTracker, InputEvent, KeyInput, TouchPoint};
pub use rng::SessionRng;
pub use session::{
    GameBroadcaster, InputSink, InputSource, NoopBroadcaster, SessionCommand, SessionHandle,
    SnakeSession,
};
pub use simulation::{SimulationLoop, TickOutcome};
pub use state::{GameOverSummary, GameSnapshot, GameStatus, Snake};
