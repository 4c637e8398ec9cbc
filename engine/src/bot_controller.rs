use crate::direction::Direction;
use crate::grid::Cell;
use crate::rng::SessionRng;
use crate::state::GameSnapshot;

/// Greedy autopilot: head for the food along any direction that does not end
/// the game on the next tick.
pub struct BotController;

impl BotController {
    pub fn calculate_move(state: &GameSnapshot, rng: &mut SessionRng) -> Option<Direction> {
        if !state.status.is_running() {
            return None;
        }

        let head = state.snake.head();
        let safe_directions: Vec<Direction> = Self::get_valid_directions(state.direction)
            .into_iter()
            .filter(|&dir| Self::is_safe_position(head.step(dir), state))
            .collect();

        match state.food {
            Some(food) => Self::closest_to(head, food, &safe_directions)
                .or_else(|| Self::random_or_current(state, &safe_directions, rng)),
            None => Self::random_or_current(state, &safe_directions, rng),
        }
    }

    fn closest_to(head: Cell, food: Cell, directions: &[Direction]) -> Option<Direction> {
        directions
            .iter()
            .copied()
            .min_by_key(|&dir| head.step(dir).manhattan_distance(food))
    }

    fn random_or_current(
        state: &GameSnapshot,
        safe_directions: &[Direction],
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        rng.pick(safe_directions)
            .copied()
            .or(Some(state.direction))
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    /// The whole body blocks, tail included, because collisions are judged
    /// before the tail moves.
    fn is_safe_position(pos: Cell, state: &GameSnapshot) -> bool {
        state.grid.in_bounds(pos) && !state.snake.contains(pos)
    }
}
