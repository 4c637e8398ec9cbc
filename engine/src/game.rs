use crate::collision::DeathReason;
use crate::config::{GameConfig, Validate};
use crate::direction::{Direction, DirectionController};
use crate::food::FoodSpawner;
use crate::grid::{Cell, GridModel};
use crate::input::InputEvent;
use crate::rng::SessionRng;
use crate::simulation::{SimulationLoop, TickOutcome};
use crate::state::{GameOverSummary, GameSnapshot, GameStatus, Snake};
use crate::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    Idle,
    Moved,
    Ate,
    GameOver(DeathReason),
}

/// Running/GameOver state machine around the simulation. The `SnakeGame` is the
/// only thing that commits snake and food values.
pub struct SnakeGame {
    config: GameConfig,
    grid: GridModel,
    simulation: SimulationLoop,
    rng: SessionRng,
    snake: Snake,
    food: Option<Cell>,
    controller: DirectionController,
    status: GameStatus,
    score: u32,
    tick: u64,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self, String> {
        let rng = SessionRng::from_optional_seed(config.seed);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, rng: SessionRng) -> Result<Self, String> {
        config.validate()?;
        let grid = config.grid()?;
        let simulation = SimulationLoop::new(grid, FoodSpawner::new(grid, config.food_spawn));
        let controller = DirectionController::new(config.initial_direction, config.gesture_threshold_px);
        let mut game = Self {
            snake: Snake::single(grid.center()),
            food: None,
            controller,
            status: GameStatus::Running,
            score: 0,
            tick: 0,
            config,
            grid,
            simulation,
            rng,
        };
        game.food = game.initial_food();
        Ok(game)
    }

    /// Starts from an arbitrary position, e.g. to resume or set up a scenario.
    pub fn from_parts(
        config: GameConfig,
        rng: SessionRng,
        body: Vec<Cell>,
        food: Option<Cell>,
        direction: Direction,
    ) -> Result<Self, String> {
        let mut game = Self::with_rng(config, rng)?;
        let snake = Snake::from_cells(body, &game.grid)?;
        if let Some(food) = food
            && !game.grid.in_bounds(food)
        {
            return Err(format!("Food {} is outside the grid", food));
        }
        game.snake = snake;
        game.food = food;
        game.controller = DirectionController::new(direction, game.config.gesture_threshold_px);
        Ok(game)
    }

    fn initial_food(&mut self) -> Option<Cell> {
        match self.config.initial_food {
            Some(cell) => Some(cell),
            None => self.simulation.spawner().spawn(self.snake.cells(), &mut self.rng),
        }
    }

    pub fn grid(&self) -> GridModel {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn applied_direction(&self) -> Direction {
        self.controller.applied_direction()
    }

    pub fn pending_direction(&self) -> Direction {
        self.controller.current_direction()
    }

    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.controller.request_direction(direction)
    }

    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.controller.handle_input(event)
    }

    pub fn tick(&mut self) -> TickEvent {
        if !self.status.is_running() {
            return TickEvent::Idle;
        }

        let direction = self.controller.latch();
        self.tick += 1;

        match self.simulation.advance(&self.snake, self.food, direction, &mut self.rng) {
            TickOutcome::Moved { snake } => {
                self.snake = snake;
                TickEvent::Moved
            }
            TickOutcome::Ate { snake, food } => {
                self.snake = snake;
                self.food = food;
                self.score += 1;
                if food.is_none() {
                    log!("No free cell left for food, snake length {}", self.snake.len());
                }
                TickEvent::Ate
            }
            TickOutcome::Collided(reason) => {
                self.status = GameStatus::GameOver(reason);
                TickEvent::GameOver(reason)
            }
        }
    }

    /// Rebuilds the round from config; only legal from GameOver.
    pub fn reset(&mut self) -> bool {
        if self.status.is_running() {
            return false;
        }
        self.snake = Snake::single(self.grid.center());
        self.controller = DirectionController::new(self.config.initial_direction, self.config.gesture_threshold_px);
        self.status = GameStatus::Running;
        self.score = 0;
        self.tick = 0;
        self.food = self.initial_food();
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid,
            snake: self.snake.clone(),
            food: self.food,
            direction: self.controller.applied_direction(),
            status: self.status,
            score: self.score,
            tick: self.tick,
        }
    }

    pub fn game_over_summary(&self) -> Option<GameOverSummary> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::GameOver(reason) => Some(GameOverSummary {
                reason,
                score: self.score,
                length: self.snake.len(),
                ticks: self.tick,
            }),
        }
    }
}
