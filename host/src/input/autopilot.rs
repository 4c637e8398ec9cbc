use std::sync::Arc;

use snake_engine::{
    BotController, GameSnapshot, InputEvent, InputSink, InputSource, KeyInput, SessionRng,
};
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

/// Steers the snake from published snapshots, one decision per tick.
pub struct AutopilotInput {
    snapshots: watch::Receiver<Arc<GameSnapshot>>,
    restart_on_game_over: bool,
    rng: SessionRng,
}

impl AutopilotInput {
    pub fn new(
        snapshots: watch::Receiver<Arc<GameSnapshot>>,
        restart_on_game_over: bool,
        rng: SessionRng,
    ) -> Self {
        Self {
            snapshots,
            restart_on_game_over,
            rng,
        }
    }
}

impl InputSource for AutopilotInput {
    fn name(&self) -> &str {
        "autopilot"
    }

    async fn run(mut self, sink: InputSink) {
        let mut updates = WatchStream::new(self.snapshots);

        while let Some(snapshot) = updates.next().await {
            let delivered = if snapshot.status.is_running() {
                match BotController::calculate_move(&snapshot, &mut self.rng) {
                    Some(direction) if direction != snapshot.direction => {
                        sink.send(InputEvent::Key(KeyInput::from(direction)))
                    }
                    _ => true,
                }
            } else if self.restart_on_game_over {
                sink.request_reset()
            } else {
                true
            };

            if !delivered {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::{Cell, GameConfig, NoopBroadcaster, SnakeGame, SnakeSession};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_autopilot_turns_towards_food() {
        let config = GameConfig {
            initial_food: Some(Cell::new(15, 10)),
            seed: Some(3),
            ..GameConfig::default()
        };
        let game = SnakeGame::new(config).unwrap();
        let mut handle = SnakeSession::start_with_game(game, NoopBroadcaster);
        let pilot = AutopilotInput::new(handle.subscribe(), false, SessionRng::new(3));
        handle.attach_input(pilot);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(handle.current_state().snake.head(), Cell::new(11, 10));

        tokio::time::sleep(Duration::from_millis(800)).await;
        let state = handle.current_state();
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 2);

        handle.shutdown().await;
    }
}
