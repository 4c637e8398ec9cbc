use crate::collision::{CollisionDetector, DeathReason};
use crate::direction::Direction;
use crate::food::FoodSpawner;
use crate::grid::{Cell, GridModel};
use crate::rng::SessionRng;
use crate::state::Snake;

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Moved { snake: Snake },
    Ate { snake: Snake, food: Option<Cell> },
    Collided(DeathReason),
}

/// One step of movement, collision and growth. Never mutates its inputs;
/// the caller commits the returned values.
pub struct SimulationLoop {
    detector: CollisionDetector,
    spawner: FoodSpawner,
}

impl SimulationLoop {
    pub fn new(grid: GridModel, spawner: FoodSpawner) -> Self {
        Self {
            detector: CollisionDetector::new(grid),
            spawner,
        }
    }

    pub fn spawner(&self) -> &FoodSpawner {
        &self.spawner
    }

    pub fn advance(
        &self,
        snake: &Snake,
        food: Option<Cell>,
        direction: Direction,
        rng: &mut SessionRng,
    ) -> TickOutcome {
        let candidate_head = snake.head().step(direction);

        if let Err(reason) = self.detector.check(candidate_head, snake.cells()) {
            return TickOutcome::Collided(reason);
        }

        let old_body = snake.cells();
        if food == Some(candidate_head) {
            let mut body = Vec::with_capacity(old_body.len() + 1);
            body.push(candidate_head);
            body.extend_from_slice(old_body);
            let food = self.spawner.spawn(&body, rng);
            TickOutcome::Ate {
                snake: Snake::from_body_unchecked(body),
                food,
            }
        } else {
            let mut body = Vec::with_capacity(old_body.len());
            body.push(candidate_head);
            body.extend_from_slice(&old_body[..old_body.len() - 1]);
            TickOutcome::Moved {
                snake: Snake::from_body_unchecked(body),
            }
        }
    }
}
